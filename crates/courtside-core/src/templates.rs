use serde_json::{json, Value};

/// Built-in category ladders.
pub fn list_templates() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "club",
            "Four-bracket club ladder: Bronze, Silver, Gold, Platinum",
        ),
        ("social", "Two open brackets for social mixers"),
        ("open", "Single unrestricted bracket"),
    ]
}

pub fn generate(template: &str, tournament: Option<&str>) -> Option<Value> {
    match template {
        "club" => Some(club(tournament)),
        "social" => Some(social(tournament)),
        "open" => Some(open(tournament)),
        _ => None,
    }
}

fn club(tournament: Option<&str>) -> Value {
    json!({
        "version": "1.0",
        "tournament": tournament.unwrap_or("Club Ladder"),
        "categories": [
            {"category": "Bronze", "min_elo": 0.0, "max_elo": 1.5, "max_participants": 16, "current_participants": 0},
            {"category": "Silver", "min_elo": 1.5, "max_elo": 2.5, "max_participants": 16, "current_participants": 0},
            {"category": "Gold", "min_elo": 2.5, "max_elo": 3.5, "max_participants": 12, "current_participants": 0},
            {"category": "Platinum", "min_elo": 3.5, "max_elo": 5.0, "max_participants": 8, "current_participants": 0}
        ]
    })
}

fn social(tournament: Option<&str>) -> Value {
    json!({
        "version": "1.0",
        "tournament": tournament.unwrap_or("Social Mixer"),
        "categories": [
            {"category": "Starter", "min_elo": 0.0, "max_elo": 2.0, "max_participants": 24, "current_participants": 0},
            {"category": "Advanced", "min_elo": 2.0, "max_elo": 7.0, "max_participants": 24, "current_participants": 0}
        ]
    })
}

fn open(tournament: Option<&str>) -> Value {
    json!({
        "version": "1.0",
        "tournament": tournament.unwrap_or("Open Draw"),
        "categories": [
            {"category": "Open", "min_elo": 0.0, "max_elo": 7.0, "max_participants": 32, "current_participants": 0}
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_passes_strict_check() {
        for (name, _) in list_templates() {
            let data = generate(name, None).unwrap();
            let report = crate::schema::check(&data, name, true, crate::types::DEFAULT_BUFFER_RANGE);
            assert!(report.pass, "template {name} failed: {report:?}");
        }
    }

    #[test]
    fn tournament_name_override() {
        let data = generate("club", Some("Winter Cup")).unwrap();
        assert_eq!(data["tournament"], "Winter Cup");
        assert_eq!(data["categories"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn unknown_template() {
        assert!(generate("ladder", None).is_none());
    }
}
