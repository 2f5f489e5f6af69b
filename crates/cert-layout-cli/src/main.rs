mod logger;

use anyhow::{Context, Result, bail};
use cert_layout::{
    ClassifiedResolver, DateStyle, EditorContext, EditorOptions, FieldClass, FieldId,
    GestureOutcome, JsonTemplateStore, Orientation, Page, PaperSize, PointerPos, PrintJob,
    Projection, RenderScale, TemplateId,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "certl", about = "Certificate template layout CLI", version)]
struct Cli {
    /// Directory holding one <id>.json file per template
    #[arg(long, global = true, default_value = "templates")]
    store: PathBuf,

    /// Template id
    #[arg(short, long, global = true, default_value = "1")]
    template: u64,

    /// Editor options JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page dimensions in millimeters and pixels
    Page {
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        #[arg(long, default_value = "portrait", value_enum)]
        orientation: OrientationArg,

        /// View zoom
        #[arg(long, default_value = "1.0")]
        zoom: f32,
    },

    /// Show the projected layout of a stored template
    Layout {
        /// View zoom (ignored with --print)
        #[arg(long, default_value = "1.0")]
        zoom: f32,

        /// Show the fixed print layout instead of the canvas
        #[arg(long)]
        print: bool,
    },

    /// Drag a field by a pointer delta and save
    Drag {
        /// Field id
        #[arg(short, long)]
        field: u64,

        /// Horizontal pointer movement in pixels
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        dx: f32,

        /// Vertical pointer movement in pixels
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        dy: f32,

        /// Zoom the pointer movement was made at
        #[arg(long, default_value = "1.0")]
        zoom: f32,
    },

    /// Drag a field's resize handle and save
    Resize {
        /// Field id
        #[arg(short, long)]
        field: u64,

        /// Horizontal pointer movement in pixels
        #[arg(long, allow_hyphen_values = true)]
        dx: f32,

        /// Zoom the pointer movement was made at
        #[arg(long, default_value = "1.0")]
        zoom: f32,
    },

    /// Adjust the background artwork and save
    Background {
        /// Horizontal offset in millimeters
        #[arg(long, allow_hyphen_values = true)]
        offset_x: Option<i32>,

        /// Vertical offset in millimeters
        #[arg(long, allow_hyphen_values = true)]
        offset_y: Option<i32>,

        /// Horizontal scale percentage (50-150)
        #[arg(long)]
        scale_x: Option<f32>,

        /// Vertical scale percentage (50-150)
        #[arg(long)]
        scale_y: Option<f32>,

        /// Apply scale changes to both axes
        #[arg(long)]
        linked: bool,

        /// Discard saved alignment and go back to the defaults
        #[arg(long)]
        reset: bool,
    },

    /// Save pending changes and render certificates to PDF
    Print {
        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// CSV file with one record per certificate (header row = field keys).
        /// Without it a layout proof page is written.
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Field keys holding dates
        #[arg(long, value_delimiter = ',')]
        date_keys: Vec<String>,

        /// How dates are written
        #[arg(long, default_value = "long", value_enum)]
        date_style: DateStyleArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum DateStyleArg {
    Long,
    Numeric,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<DateStyleArg> for DateStyle {
    fn from(arg: DateStyleArg) -> Self {
        match arg {
            DateStyleArg::Long => Self::Long,
            DateStyleArg::Numeric => Self::Numeric,
        }
    }
}

async fn load_options(path: Option<&Path>) -> Result<EditorOptions> {
    match path {
        Some(path) => EditorOptions::load(path)
            .await
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EditorOptions::default()),
    }
}

fn print_projection(ctx: &EditorContext, projection: &Projection) {
    println!(
        "Page: {:.1} x {:.1} px (zoom {})",
        projection.page_width_px, projection.page_height_px, projection.scale.zoom
    );
    for rect in &projection.fields {
        let name = ctx
            .template()
            .field(rect.field_id)
            .map(|f| f.display_name().to_string())
            .unwrap_or_default();
        let (x, y, width) = rect.to_mm(projection.scale);
        print!(
            "  {:>4} {:<20} left {:>7.1}px top {:>7.1}px  ({:.1}, {:.1}) mm",
            rect.field_id, name, rect.left_px, rect.top_px, x, y
        );
        match (rect.width_px, width) {
            (Some(px), Some(mm)) => println!("  width {:.1}px ({:.1} mm)", px, mm),
            _ => println!(),
        }
    }
    let bg = &projection.background;
    println!(
        "Background: left {:.1}% top {:.1}% size {:.1}% x {:.1}% translate ({:.1}, {:.1}) px",
        bg.left_percent,
        bg.top_percent,
        bg.width_percent,
        bg.height_percent,
        bg.translate_x_px,
        bg.translate_y_px
    );
}

/// Summary of the layout exactly as the print trigger receives it
fn print_job_lines(job: &PrintJob) -> Vec<String> {
    let mut lines = vec![format!(
        "Print page: {} x {} mm ({:.1} x {:.1} px)",
        job.page.width_mm,
        job.page.height_mm,
        job.scale.to_px(job.page.width_mm),
        job.scale.to_px(job.page.height_mm)
    )];
    for print_field in &job.fields {
        let (x, y, width) = print_field.position_mm(job.scale);
        let mut line = format!(
            "  {:>4} {:<20} left {:>7.1}px top {:>7.1}px  ({:.1}, {:.1}) mm",
            print_field.field.id,
            print_field.field.display_name(),
            print_field.rect.left_px,
            print_field.rect.top_px,
            x,
            y
        );
        if let Some(width) = width {
            line.push_str(&format!("  width {:.1} mm", width));
        }
        lines.push(line);
    }
    let bg = &job.background;
    lines.push(format!(
        "Background: {} left {:.1}% top {:.1}% size {:.1}% x {:.1}%",
        job.background_image.as_deref().unwrap_or("(none)"),
        bg.left_percent,
        bg.top_percent,
        bg.width_percent,
        bg.height_percent
    ));
    lines
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::from_verbosity(cli.verbose).init()?;

    let options = load_options(cli.config.as_deref()).await?;
    let store = JsonTemplateStore::new(&cli.store);
    let template_id = TemplateId(cli.template);

    match cli.command {
        Commands::Page {
            paper,
            orientation,
            zoom,
        } => {
            let page = Page::new(paper.into(), orientation.into());
            let scale = RenderScale::new(options.base_scale, 1.0).with_zoom(zoom);
            let (max_x, max_y) = page.max_origin(options.edge_margin_mm);
            println!("Page: {} x {} mm", page.width_mm, page.height_mm);
            println!(
                "Canvas: {:.1} x {:.1} px at zoom {}",
                scale.to_px(page.width_mm),
                scale.to_px(page.height_mm),
                scale.zoom
            );
            println!("Field origins: 0..{} x 0..{} mm", max_x, max_y);
        }

        Commands::Layout { zoom, print } => {
            let mut ctx = EditorContext::open(&store, template_id, options).await?;
            println!("Template {}: {}", template_id, ctx.template().name);
            if print {
                for line in print_job_lines(&ctx.print_job()) {
                    println!("{}", line);
                }
            } else {
                ctx.set_zoom(zoom);
                print_projection(&ctx, &ctx.canvas_projection());
            }
        }

        Commands::Drag {
            field,
            dx,
            dy,
            zoom,
        } => {
            let mut ctx = EditorContext::open(&store, template_id, options).await?;
            ctx.set_zoom(zoom);
            let field_id = FieldId(field);
            if !ctx.begin_drag(field_id, PointerPos::new(0.0, 0.0)) {
                bail!("Field {} cannot be dragged (missing or hidden)", field_id);
            }
            ctx.pointer_move(PointerPos::new(dx, dy));
            for guide in ctx.active_guides() {
                println!(
                    "Snapped to field {} at {} mm ({:?})",
                    guide.field_id, guide.position_mm, guide.axis
                );
            }
            match ctx.pointer_up() {
                GestureOutcome::Moved(record) => {
                    ctx.save_layout(&store).await?;
                    println!(
                        "Moved {}: ({}, {}) → ({}, {}) mm",
                        record.field_name, record.old.0, record.old.1, record.new.0, record.new.1
                    );
                }
                _ => println!("Field {} did not move", field_id),
            }
        }

        Commands::Resize { field, dx, zoom } => {
            let mut ctx = EditorContext::open(&store, template_id, options).await?;
            ctx.set_zoom(zoom);
            let field_id = FieldId(field);
            if !ctx.begin_resize(field_id, 0.0) {
                bail!("Field {} cannot be resized", field_id);
            }
            ctx.pointer_move(PointerPos::new(dx, 0.0));
            match ctx.pointer_up() {
                GestureOutcome::Resized {
                    old_width,
                    new_width,
                    ..
                } => {
                    ctx.save_layout(&store).await?;
                    println!(
                        "Resized field {}: {} → {} mm",
                        field_id, old_width, new_width
                    );
                }
                _ => println!("Field {} width unchanged", field_id),
            }
        }

        Commands::Background {
            offset_x,
            offset_y,
            scale_x,
            scale_y,
            linked,
            reset,
        } => {
            let mut ctx = EditorContext::open(&store, template_id, options).await?;
            let background = ctx.background_mut();
            if reset {
                let defaults = cert_layout::BackgroundAlignment::default();
                background.set_offset(defaults.offset_x, defaults.offset_y);
                background.set_scale(defaults.scale);
            }
            if linked {
                background.toggle_linked();
            }
            let current = background.current();
            background.set_offset(
                offset_x.unwrap_or(current.offset_x),
                offset_y.unwrap_or(current.offset_y),
            );
            if let Some(percent) = scale_x {
                background.set_scale_x(percent);
            }
            if let Some(percent) = scale_y {
                background.set_scale_y(percent);
            }

            let alignment = ctx.background().current();
            if ctx.background().has_changes() {
                ctx.save_background(&store).await?;
                println!("Saved background alignment");
            } else {
                println!("Background alignment unchanged");
            }
            println!(
                "  offset ({}, {}) mm, scale {}% x {}%",
                alignment.offset_x, alignment.offset_y, alignment.scale_x, alignment.scale_y
            );
        }

        Commands::Print {
            output,
            data,
            date_keys,
            date_style,
        } => {
            let mut ctx = EditorContext::open(&store, template_id, options).await?;
            let records = match &data {
                Some(path) => cert_print::load_records_from_csv(path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?,
                None => Vec::new(),
            };

            let resolver = date_keys
                .into_iter()
                .fold(ClassifiedResolver::new(), |resolver, key| {
                    resolver.classify(key, FieldClass::Date(date_style.into()))
                });
            let count = records.len();
            let printer = cert_print::PdfPrinter::new(&output, resolver).with_records(records);

            ctx.print(&store, &store, &printer).await?;
            if count == 0 {
                println!("Generated layout proof → {}", output.display());
            } else {
                println!("Generated {} certificates → {}", count, output.display());
            }
        }
    }

    Ok(())
}
