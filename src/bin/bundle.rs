//! Deployment packager
//!
//! Zips the release binary, `Cargo.toml` and the public directory into
//! `upload.zip` for upload to the hosting platform. Packaging is opt-in:
//! nothing is written unless `CREATE_ZIP=true`.
//!
//! | Variable                 | Default                             |
//! |--------------------------|-------------------------------------|
//! | `CREATE_ZIP`             | unset; only `true` writes the zip   |
//! | `BUNDLE_BINARY`          | `target/release/api_scaffold`       |
//! | `BUNDLE_MANIFEST`        | `Cargo.toml`                        |
//! | `BUNDLE_PUBLIC_DIR`      | `public` (skipped when missing)     |
//! | `BUNDLE_SWAGGER_UI_DIR`  | unset; a `swagger-ui-dist` checkout |
//! | `BUNDLE_OUTPUT`          | `upload.zip`                        |
//!
//! Swagger UI assets land in `dist/public/swagger-ui/`, so a deployment
//! setting `docs.ui_assets_url = "/swagger-ui"` serves the docs offline.

use std::env;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Files the docs page loads from `docs.ui_assets_url`
const SWAGGER_UI_ASSETS: [&str; 3] = [
    "swagger-ui.css",
    "swagger-ui-bundle.js",
    "swagger-ui-standalone-preset.js",
];

#[derive(Error, Debug)]
enum BundleError {
    #[error("required input {0} does not exist")]
    Missing(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

#[derive(Debug, Clone)]
struct BundlePlan {
    binary: PathBuf,
    manifest: PathBuf,
    public_dir: PathBuf,
    swagger_ui_dir: Option<PathBuf>,
    output: PathBuf,
}

impl BundlePlan {
    fn from_env() -> Self {
        let var = |name: &str, default: String| {
            env::var(name).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
        };
        Self {
            binary: var(
                "BUNDLE_BINARY",
                format!("target/release/api_scaffold{}", env::consts::EXE_SUFFIX),
            ),
            manifest: var("BUNDLE_MANIFEST", "Cargo.toml".to_string()),
            public_dir: var("BUNDLE_PUBLIC_DIR", "public".to_string()),
            swagger_ui_dir: env::var("BUNDLE_SWAGGER_UI_DIR").ok().map(PathBuf::from),
            output: var("BUNDLE_OUTPUT", "upload.zip".to_string()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if !zip_requested(env::var("CREATE_ZIP").ok().as_deref()) {
        tracing::info!("CREATE_ZIP is not true, skipping archive");
        return Ok(());
    }

    let plan = BundlePlan::from_env();
    let entries = write_bundle(&plan)?;
    tracing::info!(
        output = %plan.output.display(),
        entries,
        "deployment archive written"
    );
    Ok(())
}

/// Only an explicit `CREATE_ZIP=true` asks for an archive
fn zip_requested(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Write the archive described by `plan`; returns the number of files stored
fn write_bundle(plan: &BundlePlan) -> Result<usize, BundleError> {
    for required in [&plan.binary, &plan.manifest] {
        if !required.is_file() {
            return Err(BundleError::Missing(required.clone()));
        }
    }
    if let Some(dir) = &plan.swagger_ui_dir {
        if let Some(missing) = SWAGGER_UI_ASSETS
            .iter()
            .map(|name| dir.join(name))
            .find(|path| !path.is_file())
        {
            return Err(BundleError::Missing(missing));
        }
    }

    let file = File::create(&plan.output).map_err(|source| BundleError::Io {
        path: plan.output.clone(),
        source,
    })?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let binary_name = plan
        .binary
        .file_name()
        .map_or_else(|| "api_scaffold".into(), |n| n.to_string_lossy().into_owned());
    add_file(
        &mut zip,
        &plan.binary,
        &format!("dist/{binary_name}"),
        options.unix_permissions(0o755),
    )?;
    add_file(&mut zip, &plan.manifest, "Cargo.toml", options)?;
    let mut count = 2;

    if plan.public_dir.is_dir() {
        for path in collect_files(&plan.public_dir)? {
            let relative = path
                .strip_prefix(&plan.public_dir)
                .unwrap_or(&path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            add_file(&mut zip, &path, &format!("dist/public/{relative}"), options)?;
            count += 1;
        }
    } else {
        tracing::warn!(dir = %plan.public_dir.display(), "public directory missing, not bundled");
    }

    if let Some(dir) = &plan.swagger_ui_dir {
        for name in SWAGGER_UI_ASSETS {
            add_file(
                &mut zip,
                &dir.join(name),
                &format!("dist/public/swagger-ui/{name}"),
                options,
            )?;
            count += 1;
        }
    }

    zip.finish()?;
    Ok(count)
}

fn add_file(
    zip: &mut ZipWriter<File>,
    source: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<(), BundleError> {
    let io_err = |source_err| BundleError::Io {
        path: source.to_path_buf(),
        source: source_err,
    };
    let mut input = File::open(source).map_err(io_err)?;
    zip.start_file(name, options)?;
    io::copy(&mut input, zip).map_err(io_err)?;
    tracing::debug!(entry = name, "added");
    Ok(())
}

/// Every regular file below `dir`, sorted for a stable archive layout
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, BundleError> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|source| BundleError::Io {
            path: current.clone(),
            source,
        })?;
        for entry in entries {
            let path = entry
                .map_err(|source| BundleError::Io {
                    path: current.clone(),
                    source,
                })?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
