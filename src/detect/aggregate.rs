use crate::detect::result::Detection;

/// Reduces one frame's detections to per-class counts.
///
/// Pure function. Counts occurrences of each class label, preserving
/// first-seen order; labels absent from the input are absent from the
/// output, so there are never zero entries.
pub fn aggregate(detections: &[Detection]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    for detection in detections {
        match counts.iter_mut().find(|(label, _)| *label == detection.label) {
            Some((_, n)) => *n += 1,
            None => counts.push((detection.label.clone(), 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(labels: &[&str]) -> Vec<Detection> {
        labels.iter().map(|l| Detection::labeled(l)).collect()
    }

    #[test]
    fn empty_input_yields_empty_mapping() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn total_equals_input_length() {
        let input = labels(&["car", "robot", "car", "duck", "car"]);
        let counts = aggregate(&input);
        let total: u32 = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total as usize, input.len());
    }

    #[test]
    fn counts_per_label_with_first_seen_order() {
        let counts = aggregate(&labels(&["car", "robot", "car"]));
        assert_eq!(
            counts,
            vec![("car".to_string(), 2), ("robot".to_string(), 1)]
        );
    }

    #[test]
    fn no_zero_entries() {
        let counts = aggregate(&labels(&["duck"]));
        assert!(counts.iter().all(|(_, n)| *n >= 1));
    }
}
