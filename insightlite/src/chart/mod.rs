// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Chart planning
//!
//! Decides whether a query result can be charted and extracts the series to
//! draw. A chart needs one categorical column for labels and one numeric
//! column for values; anything else yields [`ChartPlan::NotEnoughData`].
//! Rendering is left to the front end.

use crate::exec::QueryResult;
use crate::storage::{ColumnType, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message shown in place of a chart when the result cannot be drawn
pub const NOT_ENOUGH_DATA_MESSAGE: &str =
    "Not enough categorical + numeric data to create a chart.";

/// Chart kinds the front end can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie];
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            other => Err(format!(
                "Unknown chart type '{}' (expected bar, line or pie)",
                other
            )),
        }
    }
}

/// Series extracted from a result: one label and one value per plotted row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub x_column: String,
    pub y_column: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Percentage share of each positive value, in row order
    ///
    /// Non-positive values cannot be drawn as slices and are left out.
    pub fn pie_shares(&self) -> Vec<(String, f64)> {
        let total: f64 = self.values.iter().filter(|v| **v > 0.0).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        self.labels
            .iter()
            .zip(&self.values)
            .filter(|(_, v)| **v > 0.0)
            .map(|(label, v)| (label.clone(), v / total * 100.0))
            .collect()
    }
}

/// Outcome of chart planning
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPlan {
    Ready(ChartData),
    NotEnoughData,
}

impl ChartPlan {
    /// Plan a chart using the first categorical column as the category axis
    /// and the first numeric column as the value axis
    pub fn from_result(result: &QueryResult) -> Self {
        let column_type = |index: usize| {
            result.column_types.get(index).copied().unwrap_or_else(|| {
                ColumnType::from_values(result.rows.iter().filter_map(|row| row.get(index)))
            })
        };

        let x = (0..result.columns.len()).find(|&i| {
            let ty = column_type(i);
            !ty.is_numeric() && ty != ColumnType::Null
        });
        let y = (0..result.columns.len()).find(|&i| column_type(i).is_numeric());

        let (x, y) = match (x, y) {
            (Some(x), Some(y)) => (x, y),
            _ => return ChartPlan::NotEnoughData,
        };

        let mut labels = Vec::new();
        let mut values = Vec::new();
        for row in &result.rows {
            let value = match row.get(y).and_then(Value::as_f64) {
                Some(value) => value,
                None => continue,
            };
            let label = row.get(x).map(|v| v.to_string()).unwrap_or_default();
            labels.push(label);
            values.push(value);
        }

        if values.is_empty() {
            return ChartPlan::NotEnoughData;
        }

        ChartPlan::Ready(ChartData {
            x_column: result.columns[x].clone(),
            y_column: result.columns[y].clone(),
            labels,
            values,
        })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ChartPlan::Ready(_))
    }
}
