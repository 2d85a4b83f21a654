//! Small, self-contained functions used to practise unit testing and mocking.
//!
//! Nothing here is used by the server. Each module pairs a toy function with
//! tests showing one technique:
//!
//! | Module            | Technique                                      |
//! |-------------------|------------------------------------------------|
//! | `sum`             | plain assertions, float comparison             |
//! | `each`            | table driven cases                             |
//! | `return_string`   | asserting on errors and their messages         |
//! | `fire_callback`   | mock callbacks and spies on real callbacks     |
//! | `get_async_value` | async tests                                    |
//! | `mocked`          | mocking a dependency trait with `automock`     |
//! | `mocks_directory` | reusable mock factories kept in one module     |
//! | `partial_mocking` | mocking one method while keeping the others    |

pub mod each;
pub mod fire_callback;
pub mod get_async_value;
pub mod mocked;
pub mod mocks_directory;
pub mod partial_mocking;
pub mod return_string;
pub mod sum;
