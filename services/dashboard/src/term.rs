//! Terminal rendering surface.
//!
//! Renders the cluster view as a table on stdout, one row per instance in
//! display order, with a load bar for the operator variant and a slot bar
//! for the player variant. The whole table is redrawn on flush; log
//! output goes to stderr so the two streams do not interleave.

use colored::Colorize;
use fleet_model::InstanceSnapshot;
use fleet_view::{LoadVisual, Surface, Variant, ViewHandle, POINTS_PER_SLOT, SLOT_WIDTH, TRACK_WIDTH};
use tabled::{Table, Tabled};

/// Glyph columns per bar cell; one column per 10 display units.
const UNITS_PER_COLUMN: u32 = 10;

#[derive(Debug, Clone)]
struct Row {
    handle: ViewHandle,
    host: String,
    ipaddress: String,
    status: String,
    load: Option<LoadVisual>,
}

#[derive(Tabled)]
struct OperatorRow {
    #[tabled(rename = "HOST")]
    host: String,
    #[tabled(rename = "ADDRESS")]
    address: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "LOAD")]
    load: String,
}

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "HOST")]
    host: String,
    #[tabled(rename = "ADDRESS")]
    address: String,
    #[tabled(rename = "SLOTS")]
    slots: String,
    #[tabled(rename = "JOIN")]
    join: String,
}

/// Terminal implementation of the rendering surface.
pub struct TerminalSurface {
    variant: Variant,
    rows: Vec<Row>,
    fleet_size: usize,
    notice: Option<(String, bool)>,
    dirty: bool,
}

impl TerminalSurface {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            rows: Vec::new(),
            fleet_size: 0,
            notice: None,
            dirty: false,
        }
    }

    fn row_mut(&mut self, handle: ViewHandle) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| row.handle == handle)
    }

    fn render(&self) -> String {
        let mut out = String::new();

        let stamp = chrono::Local::now().format("%H:%M:%S");
        out.push_str(&format!(
            "\n{} {} instances  {}\n",
            "FLEET STATUS".bold(),
            self.fleet_size,
            stamp.to_string().dimmed(),
        ));

        if let Some((text, emphasized)) = &self.notice {
            let line = if *emphasized {
                text.red().bold().to_string()
            } else {
                text.yellow().to_string()
            };
            out.push_str(&format!("{line}\n"));
        }

        if self.rows.is_empty() {
            out.push_str(&format!("{}\n", "No instances reporting.".dimmed()));
            return out;
        }

        let table = match self.variant {
            Variant::Operator => {
                let rows: Vec<OperatorRow> = self
                    .rows
                    .iter()
                    .map(|row| OperatorRow {
                        host: row.host.clone(),
                        address: row.ipaddress.clone(),
                        status: row.status.clone(),
                        load: row.load.as_ref().map(load_cell).unwrap_or_default(),
                    })
                    .collect();
                Table::new(rows).to_string()
            }
            Variant::Player => {
                let rows: Vec<PlayerRow> = self
                    .rows
                    .iter()
                    .map(|row| {
                        let (slots, join) =
                            row.load.as_ref().map(player_cells).unwrap_or_default();
                        PlayerRow {
                            host: row.host.clone(),
                            address: row.ipaddress.clone(),
                            slots,
                            join,
                        }
                    })
                    .collect();
                Table::new(rows).to_string()
            }
        };
        out.push_str(&table);
        out.push('\n');

        out
    }
}

impl Surface for TerminalSurface {
    fn insert_view(
        &mut self,
        handle: ViewHandle,
        snapshot: &InstanceSnapshot,
        load: Option<&LoadVisual>,
    ) {
        self.rows.push(Row {
            handle,
            host: snapshot.host.clone(),
            ipaddress: snapshot.ipaddress.clone(),
            status: snapshot.status.clone(),
            load: load.copied(),
        });
        self.dirty = true;
    }

    fn update_status(&mut self, handle: ViewHandle, status: &str) {
        if let Some(row) = self.row_mut(handle) {
            row.status = status.to_string();
            self.dirty = true;
        }
    }

    fn attach_load(&mut self, handle: ViewHandle, visual: &LoadVisual) {
        if let Some(row) = self.row_mut(handle) {
            row.load = Some(*visual);
            self.dirty = true;
        }
    }

    fn update_load(&mut self, handle: ViewHandle, visual: &LoadVisual) {
        if let Some(row) = self.row_mut(handle) {
            row.load = Some(*visual);
            self.dirty = true;
        }
    }

    fn remove_view(&mut self, handle: ViewHandle) {
        let before = self.rows.len();
        self.rows.retain(|row| row.handle != handle);
        if self.rows.len() != before {
            self.dirty = true;
        }
    }

    fn set_fleet_size(&mut self, count: usize) {
        if self.fleet_size != count {
            self.fleet_size = count;
            self.dirty = true;
        }
    }

    fn show_notice(&mut self, text: &str, emphasized: bool) {
        self.notice = Some((text.to_string(), emphasized));
        self.dirty = true;
    }

    fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.dirty = true;
        }
    }

    fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        print!("{}", self.render());
    }
}

/// Format the operator load cell: filled/empty bar, percentage, band name,
/// and the forced marker when the value is operator-pinned.
fn load_cell(visual: &LoadVisual) -> String {
    match visual {
        LoadVisual::Operator {
            level,
            band,
            width,
            forced,
            ..
        } => {
            let track = (TRACK_WIDTH / UNITS_PER_COLUMN) as usize;
            let filled = ((width / UNITS_PER_COLUMN) as usize).min(track);
            let marker = if *forced { " [forced]" } else { "" };
            format!(
                "{}{} {:>3}% {}{}",
                "#".repeat(filled),
                ".".repeat(track - filled),
                level,
                band.as_str(),
                marker,
            )
        }
        LoadVisual::Player { .. } => player_cells(visual).0,
    }
}

/// Format the player slot bar and join cells.
fn player_cells(visual: &LoadVisual) -> (String, String) {
    match visual {
        LoadVisual::Player { width, join_visible } => {
            let total = (100 / u32::from(POINTS_PER_SLOT)) as usize;
            let slots = ((width / SLOT_WIDTH) as usize).min(total);
            let bar = format!("{}{}", "#".repeat(slots), ".".repeat(total - slots));
            let join = if *join_visible { "open" } else { "full" };
            (bar, join.to_string())
        }
        LoadVisual::Operator { .. } => (String::new(), String::new()),
    }
}
