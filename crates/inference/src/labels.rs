/// Class names indexed by the model's class id. Order matters.
pub const CLASS_NAMES: [&str; 9] = [
    "banana-Rotten-Apple-banana--rsSP",
    "bad apple",
    "bad banana",
    "good apple",
    "good apple 1",
    "good banana",
    "good banana 1",
    "unripe apple",
    "unripe banana",
];

pub const NUM_CLASSES: usize = CLASS_NAMES.len();

/// Map a raw class id to its name, `None` for ids outside the label set.
pub fn class_name(class_id: i64) -> Option<&'static str> {
    usize::try_from(class_id)
        .ok()
        .and_then(|idx| CLASS_NAMES.get(idx).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_set_has_nine_classes() {
        assert_eq!(NUM_CLASSES, 9);
    }

    #[test]
    fn test_class_name_lookup() {
        assert_eq!(class_name(0), Some("banana-Rotten-Apple-banana--rsSP"));
        assert_eq!(class_name(3), Some("good apple"));
        assert_eq!(class_name(8), Some("unripe banana"));
    }

    #[test]
    fn test_class_name_out_of_range() {
        assert_eq!(class_name(9), None);
        assert_eq!(class_name(-1), None);
        assert_eq!(class_name(i64::MAX), None);
    }
}
