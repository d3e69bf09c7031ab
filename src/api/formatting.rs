use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::algorithms::LocateStats;
use crate::benchmark::SizeSummary;
use crate::core::{EstimateResult, Point, Station};

/// Estimate plus the context needed to report it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedEstimate {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub confidence: f64,
    pub error: f64,
    pub station_count: usize,
    /// Distance from a known true source, when one exists
    pub accuracy_km: Option<f64>,
    pub computation_time_us: u64,
    pub max_depth: u32,
    pub base_cases: usize,
}

impl FormattedEstimate {
    pub fn new(result: &EstimateResult, station_count: usize) -> Self {
        Self {
            latitude_deg: result.location.lat,
            longitude_deg: result.location.lon,
            confidence: result.confidence,
            error: result.error,
            station_count,
            accuracy_km: None,
            computation_time_us: 0,
            max_depth: 0,
            base_cases: 0,
        }
    }

    pub fn with_truth(mut self, truth: &Point) -> Self {
        self.accuracy_km = Some(truth.distance_km(&Point::new(self.latitude_deg, self.longitude_deg)));
        self
    }

    pub fn with_computation_time_us(mut self, us: u64) -> Self {
        self.computation_time_us = us;
        self
    }

    pub fn with_stats(mut self, stats: &LocateStats) -> Self {
        self.max_depth = stats.max_depth_reached;
        self.base_cases = stats.base_cases;
        self
    }
}

/// Human-readable console formatter
#[derive(Default)]
pub struct TextFormatter {
    /// Single-line output
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_estimate(&self, estimate: &FormattedEstimate) -> String {
        if self.compact {
            let mut line = format!(
                "({:.3}, {:.3}) conf={:.3} err={:.6} n={}",
                estimate.latitude_deg,
                estimate.longitude_deg,
                estimate.confidence,
                estimate.error,
                estimate.station_count
            );
            if let Some(km) = estimate.accuracy_km {
                line.push_str(&format!(" acc={:.3}km", km));
            }
            return line;
        }

        let mut output = String::new();
        output.push_str(&format!(
            "Calculated epicenter: ({:.3}, {:.3})\n",
            estimate.latitude_deg, estimate.longitude_deg
        ));
        output.push_str(&format!("Confidence: {:.3}\n", estimate.confidence));
        output.push_str(&format!("Error: {:.6}\n", estimate.error));
        if let Some(km) = estimate.accuracy_km {
            output.push_str(&format!("Location accuracy: {:.3} km\n", km));
        }
        output.push_str(&format!("Stations: {}\n", estimate.station_count));
        if estimate.base_cases > 0 {
            output.push_str(&format!(
                "Recursion: depth {}, {} base cases\n",
                estimate.max_depth, estimate.base_cases
            ));
        }
        output.push_str(&format!(
            "Execution time: {:.3} ms\n",
            estimate.computation_time_us as f64 / 1000.0
        ));
        output
    }

    pub fn format_stations(&self, stations: &[Station]) -> String {
        let mut output = String::from("Seismic stations:\n");
        for station in stations {
            output.push_str(&format!(
                "Station {}: ({:.2}, {:.2}) Time: {:.2}s\n",
                station.id, station.position.lat, station.position.lon, station.arrival_time
            ));
        }
        output
    }

    pub fn summary_header(&self) -> String {
        format!(
            "{:>8}{:>12}{:>12}{:>15}  {}",
            "Stations", "Time(ms)", "Error", "Loc.Error", "Estimated_Location"
        )
    }

    pub fn format_summary(&self, summary: &SizeSummary) -> String {
        format!(
            "{:>8}{:>12.3}{:>12.6}{:>12.3} km  ({:.3}, {:.3})",
            summary.stations,
            summary.avg_time_ms,
            summary.avg_error,
            summary.location_error_km,
            summary.avg_location.lat,
            summary.avg_location.lon
        )
    }
}

/// JSON formatter for structured output
#[derive(Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

/// CSV row formatter for sweep results
pub struct CsvFormatter {
    /// Append location error (km) and n*log2(n) columns
    pub extended: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self { extended: false }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extended() -> Self {
        Self { extended: true }
    }

    pub fn header(&self) -> String {
        let mut header = "Stations,Time_ms,Error,Location_X,Location_Y".to_string();
        if self.extended {
            header.push_str(",Location_Error_km,NLogN");
        }
        header
    }

    pub fn format_csv(&self, summary: &SizeSummary) -> String {
        let mut row = format!(
            "{},{:.6},{:.6},{:.6},{:.6}",
            summary.stations,
            summary.avg_time_ms,
            summary.avg_error,
            summary.avg_location.lat,
            summary.avg_location.lon
        );
        if self.extended {
            row.push_str(&format!(",{:.3},{:.1}", summary.location_error_km, summary.n_log_n));
        }
        row
    }
}

/// Writes sweep rows to any `io::Write`, emitting the header before the first row
pub struct CsvSink<W: Write> {
    writer: W,
    formatter: CsvFormatter,
    header_written: bool,
}

impl CsvSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P, formatter: CsvFormatter) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?), formatter))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, formatter: CsvFormatter) -> Self {
        Self {
            writer,
            formatter,
            header_written: false,
        }
    }

    pub fn write_summary(&mut self, summary: &SizeSummary) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{}", self.formatter.header())?;
            self.header_written = true;
        }
        writeln!(self.writer, "{}", self.formatter.format_csv(summary))
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        if !self.header_written {
            writeln!(self.writer, "{}", self.formatter.header())?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}
