//! Text rendering of the guild views for the terminal.

use guildboard_common::format::{DateFormatter, INVALID_DATE, format_number};
use serde_json::Value;

const MISSING: &str = "-";

/// Renders guild views as lines of fr-FR text.
pub struct Renderer {
    dates: DateFormatter,
}

impl Renderer {
    pub fn new(dates: DateFormatter) -> Self {
        Self { dates }
    }

    pub fn stats(&self, view: &Value) -> Vec<String> {
        let stats = &view["stats"];
        vec![
            format!("Utilisateurs actifs : {}", number(&stats["active_users"])),
            format!("Messages : {}", number(&stats["total_messages"])),
            format!("Actions de modération : {}", number(&stats["mod_actions"])),
        ]
    }

    pub fn top_users(&self, view: &Value) -> Vec<String> {
        rows(&view["users"])
            .enumerate()
            .map(|(rank, user)| {
                format!(
                    "#{:<3} {:<20} {} messages",
                    rank + 1,
                    id(&user["user_id"]),
                    number(&user["message_count"])
                )
            })
            .collect()
    }

    pub fn mod_logs(&self, view: &Value) -> Vec<String> {
        rows(&view["logs"])
            .map(|log| {
                let mut line = format!(
                    "{}  {}  par {} sur {}",
                    self.date(&log["timestamp"]),
                    log["action_type"].as_str().unwrap_or(MISSING),
                    id(&log["moderator_id"]),
                    id(&log["target_id"]),
                );
                if let Some(reason) = log["reason"].as_str().filter(|r| !r.is_empty()) {
                    line.push_str(" : ");
                    line.push_str(reason);
                }
                line
            })
            .collect()
    }

    pub fn activity(&self, view: &Value) -> Vec<String> {
        let counts: Vec<&Value> = rows(&view["data"]).collect();

        rows(&view["labels"])
            .enumerate()
            .map(|(i, label)| {
                let count = counts.get(i).map_or_else(|| MISSING.to_string(), |c| number(c));
                format!("{:<4} {}", label.as_str().unwrap_or(MISSING), count)
            })
            .collect()
    }

    fn date(&self, value: &Value) -> String {
        match value {
            Value::String(s) => self.dates.format(s.as_str()),
            Value::Number(n) => match n.as_i64() {
                Some(millis) => self.dates.format(&millis),
                None => INVALID_DATE.to_string(),
            },
            _ => INVALID_DATE.to_string(),
        }
    }
}

/// Error text carried by a `{"success": false, "error": ..}` reply, if that's what `view` is.
pub fn failure(view: &Value) -> Option<&str> {
    match view["success"] {
        Value::Bool(false) => Some(view["error"].as_str().unwrap_or("unknown error")),
        _ => None,
    }
}

fn rows(value: &Value) -> impl Iterator<Item = &Value> {
    value.as_array().into_iter().flatten()
}

fn number(value: &Value) -> String {
    value
        .as_f64()
        .map_or_else(|| MISSING.to_string(), format_number)
}

// Discord snowflakes exceed f64 precision; print them as given.
fn id(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => MISSING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use guildboard_common::format::GROUP_SEPARATOR;
    use jiff::tz::TimeZone;
    use serde_json::json;

    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(DateFormatter::new(TimeZone::UTC))
    }

    fn nb(s: &str) -> String {
        s.replace(' ', &GROUP_SEPARATOR.to_string())
    }

    #[test]
    fn stats_are_grouped() {
        let view = json!({
            "success": true,
            "stats": {"active_users": 1234, "total_messages": 98765, "mod_actions": 7}
        });

        assert_eq!(
            renderer().stats(&view),
            vec![
                format!("Utilisateurs actifs : {}", nb("1 234")),
                format!("Messages : {}", nb("98 765")),
                "Actions de modération : 7".to_string(),
            ]
        );
    }

    #[test]
    fn missing_fields_render_as_dash() {
        let lines = renderer().stats(&json!({"success": true}));
        assert!(lines.iter().all(|l| l.ends_with(": -")));
    }

    #[test]
    fn top_users_keep_snowflakes_exact() {
        let view = json!({
            "success": true,
            "users": [
                {"user_id": 123456789012345678u64, "message_count": 4200},
                {"user_id": 42, "message_count": 17}
            ]
        });

        let lines = renderer().top_users(&view);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#1 "));
        assert!(lines[0].contains("123456789012345678"));
        assert!(lines[0].ends_with(&format!("{} messages", nb("4 200"))));
        assert!(lines[1].ends_with("17 messages"));
    }

    #[test]
    fn mod_logs_format_timestamps() {
        let view = json!({
            "success": true,
            "logs": [
                {
                    "action_type": "ban",
                    "moderator_id": 1,
                    "target_id": 2,
                    "reason": "spam",
                    "timestamp": "2024-01-15 14:30:00"
                },
                {
                    "action_type": "warn",
                    "moderator_id": 1,
                    "target_id": 3,
                    "reason": null,
                    "timestamp": "Mon, 15 Jan 2024 09:05:00 GMT"
                }
            ]
        });

        let lines = renderer().mod_logs(&view);
        assert_eq!(lines[0], "15 janvier 2024 à 14:30  ban  par 1 sur 2 : spam");
        assert_eq!(lines[1], "15 janvier 2024 à 09:05  warn  par 1 sur 3");
    }

    #[test]
    fn activity_pairs_labels_with_counts() {
        let view = json!({
            "success": true,
            "labels": ["Lun", "Mar", "Mer"],
            "data": [1500, 0]
        });

        assert_eq!(
            renderer().activity(&view),
            vec![
                format!("Lun  {}", nb("1 500")),
                "Mar  0".to_string(),
                "Mer  -".to_string(),
            ]
        );
    }

    #[test]
    fn detects_failure_replies() {
        assert_eq!(
            failure(&json!({"success": false, "error": "database locked"})),
            Some("database locked")
        );
        assert_eq!(failure(&json!({"success": true})), None);
        assert_eq!(failure(&json!([1, 2])), None);
    }
}
