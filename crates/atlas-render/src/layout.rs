use atlas_core::{CountryRecord, MirrorStatus};

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;

const HEADLINE_SIZE: f32 = 32.0;
const BODY_SIZE: f32 = 16.0;

/// One positioned text run on the summary card.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub size: f32,
    pub x: i32,
    pub y: i32,
}

/// Lays out the full card: headline count, the top-GDP list, and the
/// last-refresh footer.
pub fn summary_lines(top: &[CountryRecord], status: &MirrorStatus) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut y = 50;

    lines.push(Line {
        text: format!("Total Countries: {}", status.total),
        size: HEADLINE_SIZE,
        x: 50,
        y,
    });
    y += 80;

    lines.push(Line {
        text: "Top 5 Countries by GDP:".to_string(),
        size: HEADLINE_SIZE,
        x: 50,
        y,
    });
    y += 60;

    for (index, record) in top.iter().enumerate() {
        lines.push(Line {
            text: format!(
                "{}. {} - {}",
                index + 1,
                record.name,
                gdp_label(record.estimated_gdp)
            ),
            size: BODY_SIZE,
            x: 70,
            y,
        });
        y += 40;
    }
    y += 40;

    let refreshed = status
        .last_refreshed_at
        .map(|ts| ts.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    lines.push(Line {
        text: format!("Last Refreshed: {refreshed}"),
        size: BODY_SIZE,
        x: 50,
        y,
    });

    lines
}

/// `$1,234,567.89` for a resolved GDP, `N/A` otherwise.
pub fn gdp_label(gdp: Option<f64>) -> String {
    match gdp {
        Some(value) => format!("${}", format_thousands(value)),
        None => "N/A".to_string(),
    }
}

fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').expect("two decimals");

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    format!("{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn record(name: &str, gdp: Option<f64>) -> CountryRecord {
        CountryRecord {
            name: name.to_string(),
            capital: None,
            region: None,
            population: 1,
            currency_code: None,
            exchange_rate: None,
            estimated_gdp: gdp,
            flag_url: None,
            last_refreshed_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0.00");
        assert_eq!(format_thousands(999.9), "999.90");
        assert_eq!(format_thousands(1000.0), "1,000.00");
        assert_eq!(format_thousands(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn gdp_label_handles_unresolved() {
        assert_eq!(gdp_label(Some(1500.0)), "$1,500.00");
        assert_eq!(gdp_label(None), "N/A");
    }

    #[test]
    fn card_structure_matches_expectations() {
        let status = MirrorStatus {
            total: 2,
            last_refreshed_at: Some(Timestamp::UNIX_EPOCH),
        };
        let top = [record("Germany", Some(30.0)), record("Atlantis", None)];

        let lines = summary_lines(&top, &status);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].text, "Total Countries: 2");
        assert_eq!(lines[1].text, "Top 5 Countries by GDP:");
        assert_eq!(lines[2].text, "1. Germany - $30.00");
        assert_eq!(lines[3].text, "2. Atlantis - N/A");
        assert_eq!(lines[4].text, "Last Refreshed: 1970-01-01T00:00:00Z");

        // Entries are indented deeper than the headline and flow downward.
        assert!(lines[2].x > lines[1].x);
        assert!(lines[3].y > lines[2].y);
    }

    #[test]
    fn footer_shows_na_when_never_refreshed() {
        let status = MirrorStatus {
            total: 0,
            last_refreshed_at: None,
        };

        let lines = summary_lines(&[], &status);

        assert_eq!(lines.last().unwrap().text, "Last Refreshed: N/A");
    }
}
