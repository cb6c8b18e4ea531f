//! Zero the red channel of a 24-bit BMP and write a blank companion image.
//!
//! Run: `cargo run --example strip_red -- input.bmp -o stripped.bmp --blank blank.bmp`
//! Set `RUST_LOG=debug` for per-step output.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn};
use zenbmp::{Bitmap24, BitmapError};

#[derive(Parser, Debug)]
#[command(version, about = "Strip the red channel from a 24-bit BMP")]
struct Args {
    /// 24-bit BMP to read
    input: PathBuf,

    /// Where to write the edited image
    #[arg(short, long, default_value = "stripped.bmp")]
    output: PathBuf,

    /// Also write a blank image of this size to the given path
    #[arg(long)]
    blank: Option<PathBuf>,

    /// Side length of the blank image
    #[arg(long, default_value_t = 1024)]
    blank_size: u32,

    /// DPI recorded in the blank image
    #[arg(long, default_value_t = zenbmp::DEFAULT_DPI)]
    dpi: u32,
}

fn strip_red(bmp: &mut Bitmap24) -> Result<usize, BitmapError> {
    let mut failures = 0;
    for row in 0..bmp.width()? {
        for col in 0..bmp.height()? {
            let mut px = bmp.get(row, col)?;
            px.r = 0;
            if let Err(err) = bmp.set(row, col, px) {
                warn!("set({row}, {col}) failed: {err}");
                failures += 1;
            }
        }
    }
    Ok(failures)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut bmp = Bitmap24::new();
    bmp.load(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    info!(
        "loaded {} ({}x{}, {} DPI)",
        args.input.display(),
        bmp.width()?,
        bmp.height()?,
        bmp.dpi()
    );

    let failures = strip_red(&mut bmp)?;
    debug!("red channel cleared with {failures} failed writes");

    bmp.write(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("wrote {}", args.output.display());

    if let Some(path) = args.blank {
        let mut blank = Bitmap24::new().with_dpi(args.dpi);
        blank.create(args.blank_size, args.blank_size)?;
        blank
            .write(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote blank {0}x{0} image to {1}", args.blank_size, path.display());
    }

    Ok(())
}
