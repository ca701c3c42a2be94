use std::path::PathBuf;

use clap::Parser;
use fluidfx_common::PhysicalSize;

/// fluidfx: an interactive GPU fluid effect driven by the pointer.
#[derive(Parser, Debug)]
#[command(name = "fluidfx", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Render on the CPU without a window and write the last frame as PNG.
    #[arg(long)]
    pub headless: bool,

    /// Number of frames to render in headless mode.
    #[arg(long, default_value_t = 60)]
    pub frames: u64,

    /// Headless surface size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size, default_value = "256x256")]
    pub size: PhysicalSize,

    /// Output PNG path for headless mode.
    #[arg(long, default_value = "fluidfx.png")]
    pub output: PathBuf,

    /// Drive a synthetic circular pointer sweep in headless mode.
    #[arg(long)]
    pub sweep: bool,
}

impl Args {
    /// Filter directive for the fluidfx crates, as accepted by `EnvFilter`.
    pub fn log_directive(&self) -> Option<String> {
        self.log_level.as_ref().map(|level| {
            if level.contains('=') {
                level.clone()
            } else {
                format!("fluidfx={level}")
            }
        })
    }
}

/// Parse `WIDTHxHEIGHT` into a non-zero size.
pub fn parse_size(s: &str) -> Result<PhysicalSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let width: u32 = w.trim().parse().map_err(|e| format!("bad width {w:?}: {e}"))?;
    let height: u32 = h.trim().parse().map_err(|e| format!("bad height {h:?}: {e}"))?;
    if width == 0 || height == 0 {
        return Err(format!("size must be non-zero, got {width}x{height}"));
    }
    Ok(PhysicalSize::new(width, height))
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["fluidfx"]).unwrap();
        assert!(!args.headless);
        assert!(!args.print_config);
        assert_eq!(args.frames, 60);
        assert_eq!(args.size, PhysicalSize::new(256, 256));
        assert_eq!(args.output, PathBuf::from("fluidfx.png"));
        assert!(args.config.is_none());
        assert!(args.log_directive().is_none());
    }

    #[test]
    fn headless_flags() {
        let args = Args::try_parse_from([
            "fluidfx",
            "--headless",
            "--frames",
            "12",
            "--size",
            "320x200",
            "--output",
            "out.png",
            "--sweep",
        ])
        .unwrap();
        assert!(args.headless);
        assert!(args.sweep);
        assert_eq!(args.frames, 12);
        assert_eq!(args.size, PhysicalSize::new(320, 200));
        assert_eq!(args.output, PathBuf::from("out.png"));
    }

    #[test]
    fn log_level_becomes_directive() {
        let args = Args::try_parse_from(["fluidfx", "--log-level", "debug"]).unwrap();
        assert_eq!(args.log_directive().as_deref(), Some("fluidfx=debug"));
        let args = Args::try_parse_from(["fluidfx", "--log-level", "wgpu=warn"]).unwrap();
        assert_eq!(args.log_directive().as_deref(), Some("wgpu=warn"));
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert_eq!(parse_size("64X48").unwrap(), PhysicalSize::new(64, 48));
        assert!(parse_size("64").is_err());
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("ax10").is_err());
        assert!(Args::try_parse_from(["fluidfx", "--size", "bad"]).is_err());
    }
}
