use std::io;

use serde_json::Value;

use super::format::{key_value_rows, text_field};

pub fn render_preview(data: &Value) -> io::Result<String> {
    let occurrence = data
        .get("occurrence")
        .ok_or_else(|| io::Error::other("preview output requires an occurrence"))?;

    let mut lines = vec![
        format!(
            "First occurrence: {}",
            text_field(occurrence, "local_date", "unknown")
        ),
        String::new(),
    ];
    let mut entries = vec![
        ("Date", text_field(occurrence, "date", "unknown")),
        ("Kind", text_field(occurrence, "kind", "unknown")),
    ];
    if let Some(window) = time_window(occurrence) {
        entries.push(("Time", window));
    }
    entries.push(("Schedule", text_field(data, "service_summary", "-")));
    entries.push(("Start date", text_field(data, "anchor", "unknown")));
    entries.push(("Month overflow", text_field(data, "month_overflow", "clamp")));
    entries.push(("Policy", text_field(data, "policy_version", "unknown")));
    lines.extend(key_value_rows(&entries, 2));

    Ok(lines.join("\n"))
}

pub fn render_normalize(data: &Value) -> io::Result<String> {
    let payload = data
        .get("payload")
        .ok_or_else(|| io::Error::other("normalize output requires a payload"))?;
    let payload_text = serde_json::to_string_pretty(payload)
        .map_err(|error| io::Error::other(error.to_string()))?;

    let mut lines = vec!["Enrollment normalized.".to_string(), String::new()];
    let mut entries = vec![
        ("Charge", text_field(data, "charge_summary", "-")),
        ("Service", text_field(data, "service_summary", "-")),
    ];
    match (data.get("first_occurrence"), data.get("preview_issue")) {
        (Some(occurrence), _) => {
            let mut first = text_field(occurrence, "local_date", "unknown");
            if let Some(window) = time_window(occurrence) {
                first = format!("{first} {window}");
            }
            entries.push(("First occurrence", first));
        }
        (None, Some(issue)) => entries.push((
            "First occurrence",
            format!("unavailable ({})", text_field(issue, "message", "unknown")),
        )),
        (None, None) => {}
    }
    lines.extend(key_value_rows(&entries, 2));

    let dropped = data
        .get("dropped_fields")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<&str>>()
        })
        .unwrap_or_default();
    if !dropped.is_empty() {
        lines.push(String::new());
        lines.push(format!("Dropped fields: {}", dropped.join(", ")));
    }

    lines.push(String::new());
    lines.push("Payload:".to_string());
    lines.extend(payload_text.lines().map(|line| format!("  {line}")));

    Ok(lines.join("\n"))
}

pub fn render_summarize(data: &Value) -> io::Result<String> {
    let form = data
        .get("form")
        .ok_or_else(|| io::Error::other("summarize output requires a form"))?;

    let mut lines = key_value_rows(
        &[
            ("Charge", text_field(data, "charge_summary", "-")),
            ("Service", text_field(data, "service_summary", "-")),
        ],
        0,
    );
    lines.push(String::new());
    lines.push("Form:".to_string());

    let form_entries = [
        ("startDate", "Start date"),
        ("endDate", "End date"),
        ("price", "Price"),
        ("billingModel", "Billing model"),
        ("recurrenceInterval", "Interval"),
        ("chargeDay", "Charge day"),
        ("dueDate", "Due date"),
        ("frequency", "Frequency"),
        ("dayOfMonth", "Day of month"),
        ("startTime", "Start time"),
        ("endTime", "End time"),
    ]
    .iter()
    .filter_map(|(key, label)| {
        form.get(*key)
            .and_then(Value::as_str)
            .map(|value| (*label, value.to_string()))
    })
    .collect::<Vec<(&str, String)>>();
    lines.extend(key_value_rows(&form_entries, 2));

    if let Some(days) = form.get("daysOfWeek").and_then(Value::as_array)
        && !days.is_empty()
    {
        let joined = days
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<&str>>()
            .join(", ");
        lines.extend(key_value_rows(&[("Weekdays", joined)], 2));
    }

    Ok(lines.join("\n"))
}

fn time_window(occurrence: &Value) -> Option<String> {
    let start = occurrence.get("start_time").and_then(Value::as_str);
    let end = occurrence.get("end_time").and_then(Value::as_str);
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(single), None) | (None, Some(single)) => Some(single.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_normalize, render_preview, render_summarize};

    #[test]
    fn preview_text_leads_with_local_date() {
        let rendered = render_preview(&json!({
            "policy_version": "schedule/v1",
            "month_overflow": "clamp",
            "anchor": "2024-03-05",
            "occurrence": {
                "date": "2024-03-11",
                "local_date": "11/03/2024",
                "kind": "weekly",
                "start_time": "08:00",
                "end_time": "09:00"
            },
            "service_summary": "Semanal (Seg), 08:00 - 09:00"
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("First occurrence: 11/03/2024"));
            assert!(text.contains("  Time            08:00 - 09:00"));
            assert!(text.contains("  Schedule        Semanal (Seg), 08:00 - 09:00"));
        }
    }

    #[test]
    fn preview_text_requires_occurrence() {
        assert!(render_preview(&json!({})).is_err());
    }

    #[test]
    fn normalize_text_reports_issue_and_dropped_fields() {
        let rendered = render_normalize(&json!({
            "payload": { "startDate": "2024-03-04" },
            "charge_summary": "Mensal (dia 5)",
            "service_summary": "Dias Específicos",
            "preview_issue": { "message": "this schedule frequency has no occurrence rule" },
            "dropped_fields": ["endDate", "price"]
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("unavailable (this schedule frequency has no occurrence rule)"));
            assert!(text.contains("Dropped fields: endDate, price"));
            assert!(text.contains("    \"startDate\": \"2024-03-04\""));
        }
    }

    #[test]
    fn summarize_text_lists_present_form_fields() {
        let rendered = render_summarize(&json!({
            "charge_summary": "Única (10/03/2024)",
            "service_summary": "Semanal (Seg, Qua)",
            "form": {
                "startDate": "04/03/2024",
                "endDate": null,
                "billingModel": "ONE_TIME",
                "daysOfWeek": ["1", "3"]
            }
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Charge   Única (10/03/2024)"));
            assert!(text.contains("  Start date     04/03/2024"));
            assert!(!text.contains("End date"));
            assert!(text.contains("  Weekdays  1, 3"));
        }
    }
}
