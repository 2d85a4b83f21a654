/// Invoke `callback` once with `message` and hand back whatever it returns
pub fn fire_callback<F, R>(message: &str, callback: F) -> R
where
    F: FnOnce(&str) -> R,
{
    callback(message)
}

/// Callback that greets whoever it is given
pub fn greet(name: &str) -> String {
    format!("Hello, {name}!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use mockall::*;
    use std::cell::RefCell;

    mock! {
        pub Callback {
            fn call(&self, message: &str) -> String;
        }
    }

    /// Records every call and forwards it to the real function
    struct Spy<F> {
        inner: F,
        calls: RefCell<Vec<String>>,
    }

    impl<F: Fn(&str) -> String> Spy<F> {
        const fn new(inner: F) -> Self {
            Self {
                inner,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn call(&self, message: &str) -> String {
            self.calls.borrow_mut().push(message.to_string());
            (self.inner)(message)
        }
    }

    #[test]
    fn test_calls_the_mock_once_with_the_message() {
        let mut callback = MockCallback::new();
        callback
            .expect_call()
            .with(eq("abc123"))
            .times(1)
            .returning(|m| m.to_uppercase());

        let received = fire_callback("abc123", |m| callback.call(m));
        assert_eq!(received, "ABC123");
    }

    #[test]
    fn test_mock_return_value_is_passed_through() {
        let mut callback = MockCallback::new();
        callback
            .expect_call()
            .times(1)
            .return_const(String::from("mocked"));

        assert_eq!(fire_callback("anything", |m| callback.call(m)), "mocked");
    }

    #[test]
    fn test_spy_keeps_the_real_behaviour() {
        let spy = Spy::new(greet);

        let received = fire_callback("world", |m| spy.call(m));

        assert_eq!(received, "Hello, world!");
        assert_eq!(*spy.calls.borrow(), vec!["world".to_string()]);
    }

    #[test]
    fn test_closures_work_as_callbacks() {
        let mut seen = None;
        let len = fire_callback("four", |m| {
            seen = Some(m.to_string());
            m.len()
        });
        assert_eq!(len, 4);
        assert_eq!(seen.as_deref(), Some("four"));
    }
}
