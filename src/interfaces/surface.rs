//! Display surfaces the poller renders into
//!
//! A surface owns a fixed set of field slots, a connection indicator and two chart
//! areas. The poller only ever writes into it.
use std::collections::BTreeMap;
use std::io::Write;

use itertools::Itertools;

use crate::constants::defaults::PLACEHOLDER;
use crate::data_mgmt::Field;
use crate::poller::ConnectionStatus;

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Chart {
    Temperature,
    Soil,
}

impl Chart {
    pub const ALL: [Chart; 2] = [Chart::Temperature, Chart::Soil];

    pub fn title(self) -> &'static str {
        match self {
            Chart::Temperature => "Air Temp (°C)",
            Chart::Soil => "Soil (%)",
        }
    }
}

pub trait Surface {
    fn set_field(&mut self, field: Field, text: &str);

    fn set_status(&mut self, status: &ConnectionStatus);

    /// Replace the chart's whole series; never a delta
    fn draw_chart(&mut self, chart: Chart, labels: &[String], values: &[f64]);

    /// Called once at the end of every tick
    fn flush(&mut self) {}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Keeps the latest state of every slot in memory
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    pub fields: BTreeMap<Field, String>,
    pub status: Option<ConnectionStatus>,
    pub charts: BTreeMap<Chart, ChartData>,
    pub chart_redraws: usize,
    pub frames: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn chart(&self, chart: Chart) -> Option<&ChartData> {
        self.charts.get(&chart)
    }
}

impl Surface for MemorySurface {
    fn set_field(&mut self, field: Field, text: &str) {
        self.fields.insert(field, text.to_string());
    }

    fn set_status(&mut self, status: &ConnectionStatus) {
        self.status = Some(status.clone());
    }

    fn draw_chart(&mut self, chart: Chart, labels: &[String], values: &[f64]) {
        self.charts.insert(
            chart,
            ChartData {
                labels: labels.to_vec(),
                values: values.to_vec(),
            },
        );
        self.chart_redraws += 1;
    }

    fn flush(&mut self) {
        self.frames += 1;
    }
}

/// Prints one line per tick, plus one sparkline per redrawn chart
pub struct TerminalSurface<W: Write> {
    out: W,
    fields: BTreeMap<Field, String>,
    status: Option<ConnectionStatus>,
    pending_charts: BTreeMap<Chart, Vec<f64>>,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            fields: BTreeMap::new(),
            status: None,
            pending_charts: BTreeMap::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn frame_line(&self) -> String {
        let status = match &self.status {
            Some(s) if s.reachable => format!("[ok] {}", s.message),
            Some(s) => format!("[!!] {}", s.message),
            None => "[..]".to_string(),
        };
        let fields = Field::ALL
            .iter()
            .map(|&field| {
                let text = self.fields.get(&field).map(String::as_str).unwrap_or(PLACEHOLDER);
                match field.unit() {
                    Some(unit) if text != PLACEHOLDER => {
                        format!("{} {} {}", field.caption(), text, unit)
                    }
                    _ => format!("{} {}", field.caption(), text),
                }
            })
            .join(" | ");
        format!("{status} {fields}")
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn set_field(&mut self, field: Field, text: &str) {
        self.fields.insert(field, text.to_string());
    }

    fn set_status(&mut self, status: &ConnectionStatus) {
        self.status = Some(status.clone());
    }

    fn draw_chart(&mut self, chart: Chart, _labels: &[String], values: &[f64]) {
        self.pending_charts.insert(chart, values.to_vec());
    }

    fn flush(&mut self) {
        let mut lines = vec![self.frame_line()];
        for (chart, values) in std::mem::take(&mut self.pending_charts) {
            let last = values
                .last()
                .map(|v| v.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            lines.push(format!(
                "  {:<14} {} ({} pts, last {})",
                chart.title(),
                sparkline(&values),
                values.len(),
                last
            ));
        }

        let written = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|_| self.out.flush());
        if let Err(e) = written {
            log::warn!("Could not write dashboard frame: {}", e);
        }
    }
}

/// Scale values onto eight bar heights between the series minimum and maximum
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = max - min;
    values
        .iter()
        .map(|&v| {
            if span <= f64::EPSILON {
                SPARK_BARS[SPARK_BARS.len() / 2]
            } else {
                let idx = ((v - min) / span * (SPARK_BARS.len() - 1) as f64).round() as usize;
                SPARK_BARS[idx.min(SPARK_BARS.len() - 1)]
            }
        })
        .collect()
}
