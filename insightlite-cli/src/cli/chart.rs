// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Text rendering of result charts

use colored::Colorize;
use insightlite::{ChartData, ChartKind, ChartPlan, NOT_ENOUGH_DATA_MESSAGE};

/// Width of the longest bar, in characters
const BAR_WIDTH: usize = 40;

const BAR: char = '█';
const LINE_MARKER: char = '●';

/// Renders a chart plan as terminal text
pub struct ChartRenderer;

impl ChartRenderer {
    pub fn render(plan: &ChartPlan, kind: ChartKind) -> String {
        let data = match plan {
            ChartPlan::Ready(data) => data,
            ChartPlan::NotEnoughData => {
                return format!("{}\n", NOT_ENOUGH_DATA_MESSAGE.yellow());
            }
        };

        let title = format!(
            "{} chart: {} by {}",
            kind.to_string().to_uppercase(),
            data.y_column,
            data.x_column
        );
        let body = match kind {
            ChartKind::Bar => Self::bars(data),
            ChartKind::Line => Self::line(data),
            ChartKind::Pie => Self::pie(data),
        };
        format!("{}\n{}", title.bold().green(), body)
    }

    fn label_width(data: &ChartData) -> usize {
        data.labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Horizontal bars scaled to the largest value; non-positive values get no bar
    fn bars(data: &ChartData) -> String {
        let width = Self::label_width(data);
        let max = data.max_value().unwrap_or(0.0);
        let mut output = String::new();
        for (label, value) in data.labels.iter().zip(&data.values) {
            let length = Self::scaled(*value, 0.0, max);
            output.push_str(&format!(
                "{:<width$} │{} {}\n",
                label,
                BAR.to_string().repeat(length),
                format_number(*value),
                width = width
            ));
        }
        output
    }

    /// One row per point with a marker placed between the minimum and maximum
    fn line(data: &ChartData) -> String {
        let width = Self::label_width(data);
        let min = data.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.max_value().unwrap_or(0.0);
        let mut output = String::new();
        for (label, value) in data.labels.iter().zip(&data.values) {
            let offset = Self::scaled(*value, min, max);
            output.push_str(&format!(
                "{:<width$} │{}{} {}\n",
                label,
                " ".repeat(offset),
                LINE_MARKER,
                format_number(*value),
                width = width
            ));
        }
        output
    }

    /// Share of each positive value as a percentage bar
    fn pie(data: &ChartData) -> String {
        let shares = data.pie_shares();
        if shares.is_empty() {
            return format!("{}\n", "No positive values to divide into slices".yellow());
        }
        let width = shares
            .iter()
            .map(|(l, _)| l.chars().count())
            .max()
            .unwrap_or(0);
        let mut output = String::new();
        for (label, share) in shares {
            let length = Self::scaled(share, 0.0, 100.0);
            output.push_str(&format!(
                "{:<width$} │{} {:.1}%\n",
                label,
                BAR.to_string().repeat(length),
                share,
                width = width
            ));
        }
        output
    }

    /// Map `value` from [low, high] onto [0, BAR_WIDTH]
    fn scaled(value: f64, low: f64, high: f64) -> usize {
        if high <= low || value <= low {
            return 0;
        }
        let ratio = ((value - low) / (high - low)).min(1.0);
        (ratio * BAR_WIDTH as f64).round() as usize
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
