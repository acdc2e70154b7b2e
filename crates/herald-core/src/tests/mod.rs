
#[cfg(test)]
mod tests {
    use crate::{PRIORITY_DEFAULT, PRIORITY_HIGH, PRIORITY_LOW};

    #[test]
    fn test_priority_constants() {
        assert_eq!(PRIORITY_DEFAULT, 0);
        assert_eq!(PRIORITY_LOW, -1);
        assert_eq!(PRIORITY_HIGH, 100);
    }

    #[test]
    fn test_priority_ordering_convention() {
        assert!(PRIORITY_HIGH > PRIORITY_DEFAULT);
        assert!(PRIORITY_DEFAULT > PRIORITY_LOW);
    }
}
