// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Prometheus text exposition parsing.
//!
//! Only what the tests need: sample lines with optional labels and a value.
//! Comment lines (`# HELP`, `# TYPE`) are skipped.

/// One parsed sample line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Metric name
    pub name: String,
    /// Label pairs in the order they were rendered
    pub labels: Vec<(String, String)>,
    /// Sample value
    pub value: f64,
}

impl Series {
    /// Whether this series carries exactly `labels`, in any order
    pub fn has_labels(&self, labels: &[(&str, &str)]) -> bool {
        self.labels.len() == labels.len()
            && labels
                .iter()
                .all(|(k, v)| self.labels.iter().any(|(sk, sv)| sk == k && sv == v))
    }
}

/// Parse every sample line. Malformed lines panic so broken output fails loudly.
pub fn parse(text: &str) -> Vec<Series> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| parse_line(line).unwrap_or_else(|| panic!("malformed sample line: {line}")))
        .collect()
}

/// Value of the series `name` with exactly `labels`, if rendered
pub fn sample(text: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    parse(text)
        .into_iter()
        .find(|s| s.name == name && s.has_labels(labels))
        .map(|s| s.value)
}

/// Number of series rendered for `name`
pub fn series_count(text: &str, name: &str) -> usize {
    parse(text).iter().filter(|s| s.name == name).count()
}

fn parse_line(line: &str) -> Option<Series> {
    let name_end = line.find(['{', ' '])?;
    let name = line[..name_end].to_string();
    let mut rest = &line[name_end..];
    let mut labels = Vec::new();

    if let Some(after_brace) = rest.strip_prefix('{') {
        let mut chars = after_brace.char_indices().peekable();
        let mut consumed = after_brace.len();

        loop {
            // label name
            let mut key = String::new();
            loop {
                let (i, c) = chars.next()?;
                match c {
                    '=' => break,
                    '}' if key.is_empty() => {
                        consumed = i + 1;
                        break;
                    }
                    ',' if key.is_empty() => continue,
                    _ => key.push(c),
                }
            }
            if key.is_empty() {
                break;
            }

            if chars.next()?.1 != '"' {
                return None;
            }

            let mut value = String::new();
            loop {
                let (_, c) = chars.next()?;
                match c {
                    '\\' => match chars.next()?.1 {
                        'n' => value.push('\n'),
                        other => value.push(other),
                    },
                    '"' => break,
                    _ => value.push(c),
                }
            }
            labels.push((key, value));

            match chars.next()? {
                (_, ',') => {
                    if let Some(&(i, '}')) = chars.peek() {
                        consumed = i + 1;
                        break;
                    }
                }
                (i, '}') => {
                    consumed = i + 1;
                    break;
                }
                _ => return None,
            }
        }

        rest = &after_brace[consumed..];
    }

    let value = rest.split_whitespace().next()?.parse().ok()?;
    Some(Series {
        name,
        labels,
        value,
    })
}
