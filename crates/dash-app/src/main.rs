//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local};
use eframe::egui::{self, Context};
use parking_lot::Mutex;
use tracing::info;

use dash_core::events::{events::PreviewExported, handler_from_fn};
use dash_core::{Editor, IdAllocator};
use dash_data::{BlobStore, EditorConfig, FileBlobStore, MemoryBlobStore, PreviewSlot};
use dash_ui::{apply_actions, header_bar, EditorCanvas, Mode, Notices, PreviewPanel, ShellAction, Theme};
use dash_views::RendererRegistry;

const CONFIG_ENV: &str = "DASHBOARD_BUILDER_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "dashboard-builder.json";

/// Time and row count of the most recent export
type LastExport = Arc<Mutex<Option<(DateTime<Local>, usize)>>>;

/// Main application state
struct DashboardApp {
    editor: Editor,
    slot: PreviewSlot,
    canvas: EditorCanvas,
    renderers: RendererRegistry,
    /// Present while the preview surface is mounted
    preview: Option<PreviewPanel>,
    mode: Mode,
    theme: Theme,
    notices: Notices,
    last_export: LastExport,
}

impl DashboardApp {
    fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let theme = if config.settings.dark_mode { Theme::dark() } else { Theme::light() };
        dash_ui::apply_theme(&cc.egui_ctx, &theme);

        let store: Arc<dyn BlobStore> = match &config.storage_dir {
            Some(dir) => {
                info!("Storing preview data in {}", dir.display());
                Arc::new(FileBlobStore::new(dir.clone()))
            }
            None => Arc::new(MemoryBlobStore::new()),
        };
        let slot = PreviewSlot::new(store, config.settings.preview_slot.clone());

        let editor = Editor::new(dash_templates::starter(&mut IdAllocator::new()), config.settings);

        let last_export: LastExport = Arc::new(Mutex::new(None));
        let recorder = last_export.clone();
        editor
            .events()
            .subscribe::<PreviewExported>(handler_from_fn(move |event| {
                if let Some(exported) = event.as_any().downcast_ref::<PreviewExported>() {
                    *recorder.lock() = Some((Local::now(), exported.rows));
                }
            }));

        Self {
            editor,
            slot,
            canvas: EditorCanvas::new(),
            renderers: RendererRegistry::builtin(),
            preview: None,
            mode: Mode::Editor,
            theme,
            notices: Notices::default(),
            last_export,
        }
    }

    fn handle(&mut self, ctx: &Context, action: ShellAction) {
        match action {
            ShellAction::OpenPreview => {
                if self.editor.export_preview(&self.slot) {
                    if let Some((at, rows)) = *self.last_export.lock() {
                        self.notices
                            .info("Preview", format!("Exported {} rows at {}", rows, at.format("%H:%M:%S")));
                    }
                } else {
                    self.notices
                        .error("Preview", "Could not store the layout; showing the last stored one");
                }
                self.open_preview();
            }
            ShellAction::ReloadPreview => self.open_preview(),
            ShellAction::BackToEditor => {
                self.preview = None;
                self.mode = Mode::Editor;
            }
            ShellAction::ToggleTheme => {
                self.theme = self.theme.toggled();
                dash_ui::apply_theme(ctx, &self.theme);
            }
        }
    }

    fn open_preview(&mut self) {
        self.preview = Some(PreviewPanel::open(&self.slot));
        self.mode = Mode::Preview;
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let stats = (self.mode == Mode::Editor).then(|| self.editor.stats());
        if let Some(action) = header_bar(ctx, self.mode, stats, &self.theme) {
            self.handle(ctx, action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.notices.show(ui);
            match self.mode {
                Mode::Editor => {
                    let actions = self.canvas.show(ui, &self.editor, &self.renderers);
                    if !actions.is_empty() {
                        apply_actions(&mut self.editor, actions);
                    }
                }
                Mode::Preview => {
                    if let Some(preview) = &self.preview {
                        preview.show(ui, &self.renderers);
                    }
                }
            }
        });
    }
}

fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let path = config_path();
    let config = EditorConfig::load_or_default(&path);
    info!("Starting Dashboard Builder (config: {})", path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 480.0]),
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard Builder",
        options,
        Box::new(move |cc| Box::new(DashboardApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
