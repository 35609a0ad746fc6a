//! Static sample data shown inside configured blocks
//!
//! Every block of a given visualization shows the same fixed data; nothing
//! here is computed from the layout.

use std::cmp::Ordering;

/// One headline figure of the metric grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiMetric {
    pub label: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub positive: bool,
}

pub const KPI_METRICS: [KpiMetric; 6] = [
    KpiMetric { label: "Total Documents", value: "2,847", change: "+12%", positive: true },
    KpiMetric { label: "Accuracy Rate", value: "98.5%", change: "+2.1%", positive: true },
    KpiMetric { label: "Avg Processing Time", value: "1.2s", change: "-0.3s", positive: true },
    KpiMetric { label: "Error Rate", value: "1.5%", change: "-0.5%", positive: true },
    KpiMetric { label: "Active Users", value: "47", change: "+5", positive: true },
    KpiMetric { label: "Queue Length", value: "23", change: "-8", positive: true },
];

/// First `count` metrics, clamped to what exists
pub fn kpi_metrics(count: usize) -> &'static [KpiMetric] {
    &KPI_METRICS[..count.min(KPI_METRICS.len())]
}

/// Value shown by a single-value block with no stored value
pub const SINGLE_VALUE: &str = "2,847";

/// Caption under a single value
pub const SINGLE_VALUE_CAPTION: &str = "+12% from last month";

/// A named sequence of values aligned with a sample's labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub values: &'static [f64],
}

/// Labelled series for the chart renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSample {
    pub labels: &'static [&'static str],
    pub series: &'static [Series],
}

impl ChartSample {
    pub fn total(&self) -> f64 {
        self.series.first().map(|s| s.values.iter().sum()).unwrap_or(0.0)
    }

    /// Largest value across all series
    pub fn max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

pub const BAR: ChartSample = ChartSample {
    labels: &["Q1", "Q2", "Q3", "Q4", "Q5"],
    series: &[Series { name: "Documents Processed", values: &[650.0, 850.0, 450.0, 750.0, 550.0] }],
};

pub const LINE: ChartSample = ChartSample {
    labels: &["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
    series: &[Series { name: "Processing Time (seconds)", values: &[2.1, 1.8, 1.5, 1.2, 1.4, 1.1] }],
};

pub const PIE: ChartSample = ChartSample {
    labels: &["Invoices", "Receipts", "Contracts", "Forms", "Other"],
    series: &[Series { name: "Document Types", values: &[35.0, 25.0, 20.0, 15.0, 5.0] }],
};

pub const DONUT: ChartSample = ChartSample {
    labels: &["Success", "Warning", "Error"],
    series: &[Series { name: "Outcome", values: &[75.0, 20.0, 5.0] }],
};

pub const AREA: ChartSample = ChartSample {
    labels: &["Week 1", "Week 2", "Week 3", "Week 4", "Week 5", "Week 6"],
    series: &[
        Series { name: "User Activity", values: &[120.0, 190.0, 300.0, 500.0, 200.0, 300.0] },
        Series { name: "Documents Processed", values: &[80.0, 150.0, 250.0, 400.0, 150.0, 250.0] },
    ],
};

pub const GAUGE: ChartSample = ChartSample {
    labels: &["Excellent", "Good", "Average", "Poor"],
    series: &[Series { name: "Quality", values: &[85.0, 10.0, 3.0, 2.0] }],
};

/// Days along x, hour bands along y
pub const HEATMAP: ChartSample = ChartSample {
    labels: &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    series: &[
        Series { name: "Hour 0-6", values: &[10.0, 15.0, 12.0, 8.0, 5.0, 20.0, 25.0] },
        Series { name: "Hour 6-12", values: &[45.0, 50.0, 48.0, 52.0, 55.0, 40.0, 35.0] },
        Series { name: "Hour 12-18", values: &[80.0, 85.0, 90.0, 88.0, 92.0, 70.0, 60.0] },
        Series { name: "Hour 18-24", values: &[30.0, 35.0, 32.0, 28.0, 25.0, 45.0, 50.0] },
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Processed,
    Processing,
    Failed,
    Pending,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Processed => "Processed",
            DocumentStatus::Processing => "Processing",
            DocumentStatus::Failed => "Failed",
            DocumentStatus::Pending => "Pending",
        }
    }
}

/// One row of the sample document table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    pub status: DocumentStatus,
    /// Zero while the document has no result
    pub accuracy: f64,
    pub date: &'static str,
    pub fields: u32,
}

impl DocumentRecord {
    /// Cell text for a column; zero accuracy and field counts show as "-"
    pub fn cell(&self, column: DocumentColumn) -> String {
        match column {
            DocumentColumn::Id => self.id.to_string(),
            DocumentColumn::Name => self.name.to_string(),
            DocumentColumn::Kind => self.kind.to_string(),
            DocumentColumn::Status => self.status.as_str().to_string(),
            DocumentColumn::Accuracy if self.accuracy > 0.0 => format!("{}%", self.accuracy),
            DocumentColumn::Fields if self.fields > 0 => self.fields.to_string(),
            DocumentColumn::Accuracy | DocumentColumn::Fields => "-".to_string(),
            DocumentColumn::Date => self.date.to_string(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        DocumentColumn::ALL
            .iter()
            .any(|&c| self.cell(c).to_lowercase().contains(needle))
    }

    fn compare(&self, other: &Self, column: DocumentColumn) -> Ordering {
        match column {
            DocumentColumn::Accuracy => self.accuracy.total_cmp(&other.accuracy),
            DocumentColumn::Fields => self.fields.cmp(&other.fields),
            DocumentColumn::Status => self.status.as_str().cmp(other.status.as_str()),
            _ => self.cell(column).cmp(&other.cell(column)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentColumn {
    Id,
    Name,
    Kind,
    Status,
    Accuracy,
    Date,
    Fields,
}

impl DocumentColumn {
    pub const ALL: [DocumentColumn; 7] = [
        DocumentColumn::Id,
        DocumentColumn::Name,
        DocumentColumn::Kind,
        DocumentColumn::Status,
        DocumentColumn::Accuracy,
        DocumentColumn::Date,
        DocumentColumn::Fields,
    ];

    pub fn header(self) -> &'static str {
        match self {
            DocumentColumn::Id => "ID",
            DocumentColumn::Name => "Document Name",
            DocumentColumn::Kind => "Type",
            DocumentColumn::Status => "Status",
            DocumentColumn::Accuracy => "Accuracy",
            DocumentColumn::Date => "Date",
            DocumentColumn::Fields => "Fields",
        }
    }
}

pub const DOCUMENTS: [DocumentRecord; 7] = [
    DocumentRecord { id: "DOC-001", name: "Invoice_2024_001.pdf", kind: "Invoice", status: DocumentStatus::Processed, accuracy: 98.5, date: "2024-01-15", fields: 12 },
    DocumentRecord { id: "DOC-002", name: "Receipt_Store_A.jpg", kind: "Receipt", status: DocumentStatus::Processed, accuracy: 95.2, date: "2024-01-15", fields: 8 },
    DocumentRecord { id: "DOC-003", name: "Contract_Legal_B.pdf", kind: "Contract", status: DocumentStatus::Processing, accuracy: 0.0, date: "2024-01-16", fields: 0 },
    DocumentRecord { id: "DOC-004", name: "Form_Application.pdf", kind: "Form", status: DocumentStatus::Processed, accuracy: 92.8, date: "2024-01-16", fields: 15 },
    DocumentRecord { id: "DOC-005", name: "Invoice_2024_002.pdf", kind: "Invoice", status: DocumentStatus::Failed, accuracy: 0.0, date: "2024-01-16", fields: 0 },
    DocumentRecord { id: "DOC-006", name: "Receipt_Gas_Station.jpg", kind: "Receipt", status: DocumentStatus::Processed, accuracy: 89.3, date: "2024-01-17", fields: 6 },
    DocumentRecord { id: "DOC-007", name: "Medical_Report.pdf", kind: "Report", status: DocumentStatus::Pending, accuracy: 0.0, date: "2024-01-17", fields: 0 },
];

/// Sort applied to the document table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSort {
    pub column: DocumentColumn,
    pub descending: bool,
}

/// Documents matching `filter` (case-insensitive, any column), optionally sorted
pub fn documents(filter: &str, sort: Option<DocumentSort>) -> Vec<&'static DocumentRecord> {
    let needle = filter.trim().to_lowercase();
    let mut rows: Vec<&'static DocumentRecord> = DOCUMENTS
        .iter()
        .filter(|d| needle.is_empty() || d.matches(&needle))
        .collect();
    if let Some(sort) = sort {
        rows.sort_by(|a, b| {
            let ord = a.compare(b, sort.column);
            if sort.descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_metrics_clamped() {
        assert_eq!(kpi_metrics(2).len(), 2);
        assert_eq!(kpi_metrics(4)[3].label, "Error Rate");
        assert_eq!(kpi_metrics(10).len(), 6);
    }

    #[test]
    fn test_series_align_with_labels() {
        for sample in [BAR, LINE, PIE, DONUT, AREA, GAUGE, HEATMAP] {
            for series in sample.series {
                assert_eq!(series.values.len(), sample.labels.len(), "{}", series.name);
            }
        }
        assert_eq!(PIE.total(), 100.0);
        assert_eq!(HEATMAP.max(), 92.0);
    }

    #[test]
    fn test_document_cells() {
        assert_eq!(DOCUMENTS[0].cell(DocumentColumn::Accuracy), "98.5%");
        assert_eq!(DOCUMENTS[2].cell(DocumentColumn::Accuracy), "-");
        assert_eq!(DOCUMENTS[2].cell(DocumentColumn::Fields), "-");
        assert_eq!(DOCUMENTS[6].cell(DocumentColumn::Status), "Pending");
    }

    #[test]
    fn test_document_filter_and_sort() {
        assert_eq!(documents("", None).len(), 7);

        let invoices: Vec<_> = documents("INVOICE", None).iter().map(|d| d.id).collect();
        assert_eq!(invoices, vec!["DOC-001", "DOC-005"]);

        let by_fields = documents(
            "",
            Some(DocumentSort {
                column: DocumentColumn::Fields,
                descending: true,
            }),
        );
        assert_eq!(by_fields[0].id, "DOC-004");
        assert_eq!(by_fields[1].id, "DOC-001");
        assert!(documents("no such document", None).is_empty());
    }
}
