//! Writes the two-sheet XLSX report.

use crate::types::ReportRow;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::BTreeMap;
use std::path::Path;

/// Fixed output file name, written to the working directory and
/// overwritten on every run.
pub const OUTPUT_FILE: &str = "motion_tasks.xlsx";

const DATA_COLUMNS: [&str; 10] = [
    "Task ID",
    "Workspace",
    "Project",
    "Task Name",
    "Assignees",
    "Status",
    "Type",
    "Last Active",
    "Duration",
    "Duration (min)",
];

const PIVOT_COLUMNS: [&str; 4] = ["Workspace", "Project", "Duration (min)", "Duration (h m)"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Workbook written, carrying the exported row count.
    Written { rows: usize },
    /// Nothing to export; no file was touched.
    NoData,
}

/// One aggregated pivot line: total minutes per (workspace, project).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    pub workspace: String,
    pub project: String,
    pub minutes: i64,
    pub label: String,
}

/// Groups rows by (workspace, project) and sums their minutes. BTreeMap
/// keys give the natural (workspace, then project) output ordering.
pub fn build_pivot(rows: &[ReportRow]) -> Vec<PivotRow> {
    let mut groups: BTreeMap<(String, String), i64> = BTreeMap::new();
    for row in rows {
        *groups
            .entry((row.workspace.clone(), row.project.clone()))
            .or_insert(0) += row.duration_minutes;
    }

    groups
        .into_iter()
        .map(|((workspace, project), minutes)| PivotRow {
            workspace,
            project,
            // The pivot always spells out hours, unlike the row label.
            label: format!("{}h {}m", minutes / 60, minutes % 60),
            minutes,
        })
        .collect()
}

/// Writes "Data Dump" and "Pivot" sheets to `path`, overwriting any
/// existing file. An empty row set writes nothing and reports `NoData`.
pub fn export_report(rows: &[ReportRow], path: &Path) -> Result<ExportOutcome> {
    if rows.is_empty() {
        return Ok(ExportOutcome::NoData);
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    write_data_sheet(workbook.add_worksheet(), rows, &header_format)?;
    write_pivot_sheet(workbook.add_worksheet(), &build_pivot(rows), &header_format)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(ExportOutcome::Written { rows: rows.len() })
}

fn write_data_sheet(sheet: &mut Worksheet, rows: &[ReportRow], header: &Format) -> Result<()> {
    sheet.set_name("Data Dump")?;
    for (col, name) in DATA_COLUMNS.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *name, header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write(r, 0, &row.task_id)?;
        sheet.write(r, 1, &row.workspace)?;
        sheet.write(r, 2, &row.project)?;
        sheet.write(r, 3, &row.task_name)?;
        sheet.write(r, 4, &row.assignee)?;
        sheet.write(r, 5, row.status.to_string())?;
        sheet.write(r, 6, row.kind.to_string())?;
        sheet.write(r, 7, &row.last_active)?;
        sheet.write(r, 8, &row.duration_label)?;
        sheet.write(r, 9, row.duration_minutes)?;
    }

    sheet.set_column_width(3, 40)?;
    sheet.set_column_width(7, 18)?;
    Ok(())
}

fn write_pivot_sheet(sheet: &mut Worksheet, pivot: &[PivotRow], header: &Format) -> Result<()> {
    sheet.set_name("Pivot")?;
    for (col, name) in PIVOT_COLUMNS.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *name, header)?;
    }

    for (i, line) in pivot.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write(r, 0, &line.workspace)?;
        sheet.write(r, 1, &line.project)?;
        sheet.write(r, 2, line.minutes)?;
        sheet.write(r, 3, &line.label)?;
    }

    sheet.set_column_width(0, 24)?;
    sheet.set_column_width(1, 24)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TaskKind, TaskStatus};
    use tempfile::TempDir;

    fn row(workspace: &str, project: &str, minutes: i64) -> ReportRow {
        ReportRow {
            task_id: "t".to_string(),
            workspace: workspace.to_string(),
            project: project.to_string(),
            task_name: "Task".to_string(),
            assignee: "Ann".to_string(),
            status: TaskStatus::Completed,
            kind: TaskKind::Regular,
            last_active: "2025-04-12 09:30".to_string(),
            duration_label: crate::report::format_duration(minutes),
            duration_minutes: minutes,
        }
    }

    #[test]
    fn test_pivot_sums_per_group() {
        let rows = vec![
            row("Eng", "API", 90),
            row("Eng", "API", 30),
            row("Eng", "Web", 15),
        ];

        let pivot = build_pivot(&rows);
        assert_eq!(pivot.len(), 2);
        assert_eq!(pivot[0].project, "API");
        assert_eq!(pivot[0].minutes, 120);
        assert_eq!(pivot[0].label, "2h 0m");
        assert_eq!(pivot[1].project, "Web");
        assert_eq!(pivot[1].minutes, 15);
        // The pivot label spells out zero hours.
        assert_eq!(pivot[1].label, "0h 15m");
    }

    #[test]
    fn test_pivot_orders_by_workspace_then_project() {
        let rows = vec![
            row("Ops", "Zeta", 5),
            row("Eng", "Web", 5),
            row("Eng", "API", 5),
        ];

        let keys: Vec<(String, String)> = build_pivot(&rows)
            .into_iter()
            .map(|p| (p.workspace, p.project))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Eng".to_string(), "API".to_string()),
                ("Eng".to_string(), "Web".to_string()),
                ("Ops".to_string(), "Zeta".to_string()),
            ]
        );
    }

    #[test]
    fn test_export_writes_workbook() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        let rows = vec![row("Eng", "API", 90)];

        let outcome = export_report(&rows, &path).unwrap();
        assert_eq!(outcome, ExportOutcome::Written { rows: 1 });
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        std::fs::write(&path, b"stale").unwrap();

        let outcome = export_report(&[row("Eng", "API", 10)], &path).unwrap();
        assert_eq!(outcome, ExportOutcome::Written { rows: 1 });
        // An xlsx file is a zip archive, so the stale bytes are gone.
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_empty_rows_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OUTPUT_FILE);

        let outcome = export_report(&[], &path).unwrap();
        assert_eq!(outcome, ExportOutcome::NoData);
        assert!(!path.exists());
    }
}
