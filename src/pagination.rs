/// Page count the way the list endpoints report it: ceiling division,
/// zero pages for an empty result set.
pub fn pages_for(total: i64, per_page: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + per_page - 1) / per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_zero_pages() {
        assert_eq!(pages_for(0, 50), 0);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(pages_for(50, 50), 1);
        assert_eq!(pages_for(100, 50), 2);
    }

    #[test]
    fn remainder_rounds_up() {
        assert_eq!(pages_for(51, 50), 2);
        assert_eq!(pages_for(1, 50), 1);
    }
}
