use finboard_domain::CategoryKey;
use strsim::levenshtein;

const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Closest known category to `requested`, or `None` when it already exists or nothing is close.
pub fn suggest_category(requested: &CategoryKey, known: &[String]) -> Option<String> {
    if known.iter().any(|label| requested.matches(label)) {
        return None;
    }
    known
        .iter()
        .filter_map(|label| {
            let candidate = CategoryKey::parse(label)?;
            Some((levenshtein(requested.key(), candidate.key()), label))
        })
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, label)| label.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        vec!["Food".into(), "Fuel".into(), "Rent".into(), "Household".into()]
    }

    #[test]
    fn suggests_nearest_label() {
        assert_eq!(
            suggest_category(&CategoryKey::new("Hosehold"), &known()),
            Some("Household".into())
        );
    }

    #[test]
    fn ties_keep_the_first_known_label() {
        assert_eq!(
            suggest_category(&CategoryKey::new("Fuud"), &known()),
            Some("Food".into())
        );
    }

    #[test]
    fn existing_or_distant_categories_get_no_hint() {
        assert_eq!(suggest_category(&CategoryKey::new(" FOOD "), &known()), None);
        assert_eq!(suggest_category(&CategoryKey::new("Entertainment"), &known()), None);
    }
}
