/// Numeric difficulty used inside the optimizer.
///
/// Division labels map onto a 1-5 scale; a label that parses as an
/// integer is taken at face value and anything unrecognised lands on
/// the middle of the scale.
pub fn difficulty_value(label: &str) -> f64 {
    let label = label.trim();
    if let Ok(value) = label.parse::<i64>() {
        return value as f64;
    }
    match label {
        "Co-Rec - Just Fun" => 1.0,
        "Womens" | "TBD" => 3.0,
        "Open - Just Fun" | "Co-Rec - Top Gun" => 4.0,
        "Open - Top Gun" => 5.0,
        _ => 3.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_labels_map_onto_the_scale() {
        assert_eq!(difficulty_value("Co-Rec - Just Fun"), 1.0);
        assert_eq!(difficulty_value("Womens"), 3.0);
        assert_eq!(difficulty_value("TBD"), 3.0);
        assert_eq!(difficulty_value("Open - Just Fun"), 4.0);
        assert_eq!(difficulty_value("Co-Rec - Top Gun"), 4.0);
        assert_eq!(difficulty_value("Open - Top Gun"), 5.0);
    }

    #[test]
    fn integer_labels_pass_through() {
        assert_eq!(difficulty_value("2"), 2.0);
        assert_eq!(difficulty_value(" 5 "), 5.0);
    }

    #[test]
    fn unknown_labels_default_to_the_middle() {
        assert_eq!(difficulty_value("Masters"), 3.0);
        assert_eq!(difficulty_value(""), 3.0);
    }
}
