//! Frame printing: aligned text table or JSON lines

use crate::runner::{Frame, RunReport};
use kinetic_core::{AnimatableValue, PropertyKey};
use serde_json::{json, Map, Value};
use std::io::{self, Write};

const TIME_WIDTH: usize = 8;
const COLUMN_WIDTH: usize = 20;

/// Write the report as a text table
pub fn write_table(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    writeln!(out, "{}: {}", report.demo.name(), report.demo.description())?;

    let keys: Vec<PropertyKey> = report
        .frames
        .first()
        .map(|frame| frame.values.iter().map(|(key, _)| *key).collect())
        .unwrap_or_default();

    write!(out, "{:>TIME_WIDTH$}", "time")?;
    for key in &keys {
        write!(out, " {:>COLUMN_WIDTH$}", key.kind.name())?;
    }
    writeln!(out)?;

    for frame in &report.frames {
        write!(out, "{:>TIME_WIDTH$.3}", frame.time)?;
        for key in &keys {
            let cell = frame
                .value(*key)
                .map(|value| value.to_string())
                .unwrap_or_else(|| "-".to_string());
            write!(out, " {cell:>COLUMN_WIDTH$}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", summary(report))
}

/// Write one JSON object per frame, then a summary object
pub fn write_json_lines(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    for frame in &report.frames {
        writeln!(out, "{}", frame_json(frame))?;
    }
    let summary = json!({
        "demo": report.demo.name(),
        "completion": report.completion.map(|p| format!("{p:?}").to_lowercase()),
        "timed_out": report.timed_out,
    });
    writeln!(out, "{summary}")
}

fn summary(report: &RunReport) -> String {
    match (report.completion, report.timed_out) {
        (Some(position), _) => format!("completed at {position:?}"),
        (None, true) => "timed out before completing".to_string(),
        (None, false) => "finished without completion".to_string(),
    }
}

fn frame_json(frame: &Frame) -> Value {
    let mut values = Map::new();
    for (key, value) in &frame.values {
        values.insert(key.to_string(), value_json(value));
    }
    json!({
        "frame": frame.index,
        "time": frame.time,
        "values": values,
    })
}

fn value_json(value: &AnimatableValue) -> Value {
    match value {
        AnimatableValue::Scalar(v) => json!(v),
        AnimatableValue::Color(c) => json!({ "hex": c.to_hex_string(), "alpha": c.a }),
        AnimatableValue::Size(s) => json!({ "width": s.width, "height": s.height }),
        AnimatableValue::Point(p) => json!({ "x": p.x, "y": p.y }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KineticConfig;
    use crate::demos::Demo;
    use crate::runner::run;

    #[test]
    fn table_has_header_and_summary() {
        let report = run(Demo::BeginCommit, &KineticConfig::default()).unwrap();
        let mut out = Vec::new();
        write_table(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("begin-commit:"));
        assert!(lines[1].contains("corner-radius"));
        assert_eq!(lines.len(), report.frames.len() + 3);
        assert_eq!(*lines.last().unwrap(), "completed at End");
    }

    #[test]
    fn json_lines_parse() {
        let report = run(Demo::Reverse, &KineticConfig::default()).unwrap();
        let mut out = Vec::new();
        write_json_lines(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed.len(), report.frames.len() + 1);
        assert_eq!(parsed[0]["values"]["node#1.color"]["hex"], "#ff0000");
        assert_eq!(parsed.last().unwrap()["completion"], "start");
    }
}
