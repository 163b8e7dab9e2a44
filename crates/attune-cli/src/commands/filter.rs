use anyhow::{Context, Result};
use attune_core::{filter, Dimension, Parameter, ParameterVector, Record};
use attune_source::{Config, Loader, RecordSource};
use serde::Serialize;

/// Targets and tolerances for a one-shot filter.
#[derive(Debug, clap::Args)]
pub struct FilterArgs {
    /// Target tempo in BPM (50-200)
    #[arg(long, default_value_t = Parameter::Tempo.control().default)]
    pub tempo: f64,

    /// Shared tolerance for the 0-1 features (0.01-0.5)
    #[arg(long, default_value_t = Parameter::Tolerance.control().default)]
    pub tolerance: f64,

    /// Tempo tolerance in BPM (1-50)
    #[arg(long, default_value_t = Parameter::TempoTolerance.control().default)]
    pub tempo_tolerance: f64,

    /// Target danceability (0-1)
    #[arg(long, default_value_t = Parameter::Danceability.control().default)]
    pub danceability: f64,

    /// Target energy (0-1)
    #[arg(long, default_value_t = Parameter::Energy.control().default)]
    pub energy: f64,

    /// Target valence, how bright the song feels (0-1)
    #[arg(long, default_value_t = Parameter::Valence.control().default)]
    pub valence: f64,

    /// Target acousticness (0-1)
    #[arg(long, default_value_t = Parameter::Acousticness.control().default)]
    pub acousticness: f64,

    /// Target instrumentalness (0-1)
    #[arg(long, default_value_t = Parameter::Instrumentalness.control().default)]
    pub instrumentalness: f64,

    /// Print the matches as JSON
    #[arg(long)]
    pub json: bool,
}

impl FilterArgs {
    pub fn params(&self) -> ParameterVector {
        ParameterVector {
            tempo_target: self.tempo,
            tempo_tolerance: self.tempo_tolerance,
            tolerance: self.tolerance,
            danceability_target: self.danceability,
            energy_target: self.energy,
            valence_target: self.valence,
            acousticness_target: self.acousticness,
            instrumentalness_target: self.instrumentalness,
        }
    }
}

pub async fn run_filter(config: &Config, args: &FilterArgs) -> Result<()> {
    let params = args.params();
    params.validate().context("Invalid filter parameters")?;

    let source = RecordSource::parse(&config.source);
    let loader = Loader::new(config)?;
    let records = loader
        .load(&source)
        .await
        .with_context(|| format!("Failed to load records from {}", source))?;

    let output = if args.json {
        render_json(&records, &params)?
    } else {
        render_text(&records, &params)
    };
    print!("{}", output);

    Ok(())
}

/// One matching song as shown to the user.
#[derive(Debug, Serialize)]
struct MatchView<'a> {
    name: &'a str,
    artist: &'a str,
    tempo: Option<f64>,
    album_art_url: Option<&'a str>,
}

impl<'a> From<&'a Record> for MatchView<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            name: &record.name,
            artist: &record.artist,
            tempo: record.number(Dimension::Tempo),
            album_art_url: record.album_art_url.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    params: &'a ParameterVector,
    /// Set when the catalog itself was empty, as opposed to nothing matching.
    no_data: bool,
    count: usize,
    matches: Vec<MatchView<'a>>,
}

fn render_json(records: &[Record], params: &ParameterVector) -> Result<String> {
    let matches: Vec<MatchView<'_>> = filter(records, params)
        .into_iter()
        .map(MatchView::from)
        .collect();
    let report = Report {
        params,
        no_data: records.is_empty(),
        count: matches.len(),
        matches,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

fn render_text(records: &[Record], params: &ParameterVector) -> String {
    if records.is_empty() {
        return "No data available.\n".to_string();
    }

    let matches = filter(records, params);
    log::debug!("{} of {} records match", matches.len(), records.len());

    let mut out = format!("Matching songs: {}\n", matches.len());
    for record in matches {
        out.push('\n');
        out.push_str(&format_match(record));
    }
    out
}

/// Name and tempo, then artist and artwork on indented lines.
fn format_match(record: &Record) -> String {
    let heading = match record.number(Dimension::Tempo) {
        Some(tempo) => format!("{} - {:.1} BPM", record.name, tempo),
        None => record.name.clone(),
    };
    match &record.album_art_url {
        Some(url) => format!("{}\n  {}\n  {}\n", heading, record.artist, url),
        None => format!("{}\n  {}\n", heading, record.artist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: FilterArgs,
    }

    fn song(name: &str, artist: &str, tempo: f64) -> Record {
        Dimension::UNIT.into_iter().fold(
            Record::new(name, artist).with_feature(Dimension::Tempo, tempo),
            |r, d| r.with_feature(d, 0.5),
        )
    }

    #[test]
    fn test_default_args_match_default_params() {
        let harness = Harness::parse_from(["attune"]);
        assert_eq!(harness.args.params(), ParameterVector::default());
        assert!(!harness.args.json);
    }

    #[test]
    fn test_args_override_targets() {
        let harness = Harness::parse_from([
            "attune",
            "--tempo",
            "90",
            "--tolerance",
            "0.25",
            "--energy",
            "0.8",
            "--tempo-tolerance",
            "10",
        ]);
        let params = harness.args.params();
        assert_eq!(params.tempo_target, 90.0);
        assert_eq!(params.tolerance, 0.25);
        assert_eq!(params.energy_target, 0.8);
        assert_eq!(params.tempo_tolerance, 10.0);
        assert_eq!(params.valence_target, 0.5);
    }

    #[test]
    fn test_format_match() {
        let record = song("Blue", "Joni", 120.04).with_album_art("https://img/blue.jpg");
        assert_eq!(
            format_match(&record),
            "Blue - 120.0 BPM\n  Joni\n  https://img/blue.jpg\n"
        );
    }

    #[test]
    fn test_render_text_lists_matches_in_order() {
        let records = vec![
            song("B", "x", 121.0),
            song("Slow", "y", 80.0),
            song("A", "z", 119.5),
        ];
        let text = render_text(&records, &ParameterVector::default());
        assert_eq!(
            text,
            "Matching songs: 2\n\nB - 121.0 BPM\n  x\n\nA - 119.5 BPM\n  z\n"
        );
    }

    #[test]
    fn test_render_text_zero_matches() {
        let records = vec![song("Slow", "y", 80.0)];
        assert_eq!(
            render_text(&records, &ParameterVector::default()),
            "Matching songs: 0\n"
        );
    }

    #[test]
    fn test_render_text_no_data() {
        assert_eq!(
            render_text(&[], &ParameterVector::default()),
            "No data available.\n"
        );
    }

    #[test]
    fn test_render_json() {
        let records = vec![song("A", "x", 120.0), song("Slow", "y", 80.0)];
        let json = render_json(&records, &ParameterVector::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["no_data"], false);
        assert_eq!(value["count"], 1);
        assert_eq!(value["matches"][0]["name"], "A");
        assert_eq!(value["matches"][0]["tempo"], 120.0);
        assert_eq!(value["params"]["tolerance"], 0.1);
    }

    #[test]
    fn test_render_json_no_data() {
        let json = render_json(&[], &ParameterVector::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["no_data"], true);
        assert_eq!(value["count"], 0);
        assert!(value["matches"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_render_json_zero_matches_has_data() {
        let records = vec![song("Slow", "y", 80.0)];
        let json = render_json(&records, &ParameterVector::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["no_data"], false);
        assert_eq!(value["count"], 0);
    }
}
