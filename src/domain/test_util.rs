use anyhow::anyhow;

/// Connectivity represents the "connected" state of a fake store and lets tests simulate
/// the store being unreachable.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Return an error if connectivity is in a "disconnected" state
    pub fn blow_up_if_disconnected(&self) -> Result<(), anyhow::Error> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(anyhow!("could not connect to the todo store!")),
        }
    }
}

/// FakeImplementation stands in for one function of a mocked port. It records the arguments of
/// every call and hands back a canned return value, which is enough to mock the async
/// functions on our port traits.
///
/// * [Args] represents the arguments passed to the function that should be captured on a call
/// * [Ret] represents the type of the function's return value
///
/// # Example
///
/// ```ignore
/// impl TodoPort for Mutex<MockTodoService> {
///     async fn todo_by_id(&self, todo_id: &str, _todo_read: &impl TodoReader) -> Result<Todo, TodoError> {
///         let mut locked_self = self.lock().unwrap();
///         locked_self.todo_by_id_result.save_arguments(todo_id.to_owned());
///
///         locked_self.todo_by_id_result.return_value_result()
///     }
/// }
/// ```
pub struct FakeImplementation<Args, Ret> {
    saved_arguments: Vec<Args>,
    return_value: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            saved_arguments: Vec::new(),
            return_value: None,
        }
    }

    /// Saves arguments from a single invocation of the FakeImplementation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.saved_arguments.push(arguments)
    }

    /// Returns the list of arguments passed on every call to this FakeImplementation
    pub fn calls(&self) -> &[Args] {
        self.saved_arguments.as_slice()
    }
}

impl<Args, Success, Fail> FakeImplementation<Args, Result<Success, Fail>>
where
    Success: Clone,
    Fail: Clone,
{
    /// Set the result that should be returned when this FakeImplementation is invoked
    pub fn set_returned_result(&mut self, return_value: Result<Success, Fail>) {
        self.return_value = Some(return_value)
    }

    /// Retrieve a copy of the configured result. Panics if no result was configured.
    pub fn return_value_result(&self) -> Result<Success, Fail> {
        match self.return_value {
            Some(Ok(ref ok_result)) => Ok(ok_result.clone()),
            Some(Err(ref err)) => Err(err.clone()),
            None => panic!("Tried to return from a function where the return value wasn't set!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_and_replays_result() {
        let mut fake: FakeImplementation<String, Result<i32, String>> = FakeImplementation::new();
        fake.set_returned_result(Err("nope".to_owned()));

        fake.save_arguments("first".to_owned());
        fake.save_arguments("second".to_owned());

        assert_eq!(["first".to_owned(), "second".to_owned()], fake.calls());
        assert_eq!(Err("nope".to_owned()), fake.return_value_result());
        assert_eq!(Err("nope".to_owned()), fake.return_value_result());
    }

    #[test]
    fn disconnected_store_errors() {
        assert!(Connectivity::Connected.blow_up_if_disconnected().is_ok());
        assert!(Connectivity::Disconnected.blow_up_if_disconnected().is_err());
    }
}
