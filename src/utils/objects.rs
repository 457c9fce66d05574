/// First `Some` among the given values, or `None` if all are empty
pub fn first_some<T, I>(first: Option<T>, second: Option<T>, rest: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    first.or(second).or_else(|| rest.into_iter().flatten().next())
}

/// First `Some` produced by the suppliers, evaluated in order.
///
/// Suppliers after the first hit are never called.
pub fn first_supplied_some<T, A, B, I>(first: A, second: B, rest: I) -> Option<T>
where
    A: FnOnce() -> Option<T>,
    B: FnOnce() -> Option<T>,
    I: IntoIterator,
    I::Item: FnOnce() -> Option<T>,
{
    first()
        .or_else(second)
        .or_else(|| rest.into_iter().find_map(|supplier| supplier()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_first_some() {
        assert_eq!(first_some(Some(1), Some(2), []), Some(1));
        assert_eq!(first_some(None, Some(2), []), Some(2));
        assert_eq!(first_some(None, None, [None, Some(3), Some(4)]), Some(3));
        assert_eq!(first_some::<i32, _>(None, None, [None, None]), None);
    }

    #[test]
    fn test_first_supplied_some_is_lazy() {
        let calls = Cell::new(0);
        let count = |value: Option<&'static str>| {
            calls.set(calls.get() + 1);
            value
        };

        let rest: Vec<Box<dyn FnOnce() -> Option<&'static str> + '_>> = vec![
            Box::new(|| count(Some("third"))),
            Box::new(|| count(Some("fourth"))),
        ];
        let result = first_supplied_some(|| count(None), || count(None), rest);

        assert_eq!(result, Some("third"));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_first_supplied_some_all_empty() {
        let rest: [fn() -> Option<u8>; 1] = [|| None];
        assert_eq!(first_supplied_some(|| None, || None, rest), None);
    }
}
