use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{AnimationSink, SinkConfig};
use crate::foundation::core::Canvas;
use crate::foundation::error::{FlowError, FlowResult};
use crate::sequence::frames::SequenceFrame;

/// Options for [`GifSink`] output.
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// NeuQuant sampling speed in `1..=30`; lower is slower and more accurate.
    pub quantize_speed: i32,
}

impl GifSinkOpts {
    /// Create options for writing a GIF to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            quantize_speed: 10,
        }
    }
}

/// Sink that writes an infinitely looping GIF.
///
/// Each frame carries its own delay and uses `Background` disposal, so every frame fully replaces
/// the previous one. Frames are quantized independently and written in push order. Bytes go to a
/// sibling `*.partial` file that is renamed onto `out_path` only when `end` succeeds; otherwise it
/// is removed when the sink is dropped.
pub struct GifSink {
    opts: GifSinkOpts,

    // Declared before `partial` so the file handle closes before the guard removes it.
    encoder: Option<::gif::Encoder<BufWriter<File>>>,
    partial: TempFileGuard,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    frames_written: usize,
}

impl GifSink {
    /// Create a new sink writing to `opts.out_path`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            partial: TempFileGuard(None),
            scratch: Vec::new(),
            cfg: None,
            frames_written: 0,
        }
    }
}

impl AnimationSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> FlowResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(FlowError::validation("gif width/height must be non-zero"));
        }
        let (Ok(w), Ok(h)) = (u16::try_from(cfg.width), u16::try_from(cfg.height)) else {
            return Err(FlowError::validation(format!(
                "gif dimensions are limited to 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        };
        if !(1..=30).contains(&self.opts.quantize_speed) {
            return Err(FlowError::validation("gif quantize_speed must be in 1..=30"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(FlowError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        let partial_path = partial_path_for(&self.opts.out_path);
        let file = File::create(&partial_path)
            .with_context(|| format!("failed to create '{}'", partial_path.display()))?;
        self.partial = TempFileGuard(Some(partial_path));

        let mut encoder = ::gif::Encoder::new(BufWriter::new(file), w, h, &[])
            .map_err(|e| FlowError::encode(format!("failed to start gif stream: {e}")))?;
        encoder
            .set_repeat(::gif::Repeat::Infinite)
            .map_err(|e| FlowError::encode(format!("failed to write loop extension: {e}")))?;

        self.scratch = vec![0u8; Canvas::new(cfg.width, cfg.height)?.rgba8_len()?];
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &SequenceFrame) -> FlowResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| FlowError::encode("gif sink not started"))?;
        let (fw, fh) = frame.image.dimensions();
        if fw != cfg.width || fh != cfg.height {
            return Err(FlowError::validation(format!(
                "frame size mismatch: got {fw}x{fh}, expected {}x{}",
                cfg.width, cfg.height
            )));
        }
        if frame.duration_ms == 0 {
            return Err(FlowError::validation("frame duration must be > 0 ms"));
        }
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(FlowError::encode("gif sink is already finalized"));
        };

        self.scratch.copy_from_slice(frame.image.as_raw());
        let mut out = ::gif::Frame::from_rgba_speed(
            cfg.width as u16,
            cfg.height as u16,
            &mut self.scratch,
            self.opts.quantize_speed,
        );
        out.delay = delay_centis(frame.duration_ms);
        out.dispose = ::gif::DisposalMethod::Background;

        encoder.write_frame(&out).map_err(|e| {
            FlowError::encode(format!("failed to write frame {}: {e}", self.frames_written))
        })?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> FlowResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| FlowError::encode("gif sink not started"))?;
        if self.frames_written == 0 {
            return Err(FlowError::encode("gif needs at least one frame"));
        }
        let announced = self.cfg.map_or(0, |cfg| cfg.frame_count);
        if self.frames_written != announced {
            return Err(FlowError::encode(format!(
                "gif sink was promised {announced} frames but received {}",
                self.frames_written
            )));
        }

        let writer = encoder
            .into_inner()
            .map_err(|e| FlowError::encode(format!("failed to finish gif stream: {e}")))?;
        let file = writer
            .into_inner()
            .map_err(|e| FlowError::encode(format!("failed to flush gif: {}", e.error())))?;
        file.sync_all().context("failed to sync gif to disk")?;
        drop(file);

        let partial_path = self
            .partial
            .0
            .take()
            .ok_or_else(|| FlowError::encode("gif sink lost its partial file"))?;
        if let Err(e) = std::fs::rename(&partial_path, &self.opts.out_path) {
            let _ = std::fs::remove_file(&partial_path);
            return Err(anyhow::Error::new(e)
                .context(format!(
                    "failed to move gif into place at '{}'",
                    self.opts.out_path.display()
                ))
                .into());
        }

        tracing::debug!(
            frames = self.frames_written,
            path = %self.opts.out_path.display(),
            "gif finalized"
        );
        self.cfg = None;
        Ok(())
    }
}

/// GIF frame delay in centiseconds, rounded to nearest and at least 1.
pub fn delay_centis(duration_ms: u32) -> u16 {
    let cs = (u64::from(duration_ms) + 5) / 10;
    cs.clamp(1, u64::from(u16::MAX)) as u16
}

fn partial_path_for(out: &Path) -> PathBuf {
    let mut name = out
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "animation.gif".into());
    name.push(".partial");
    out.with_file_name(name)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> FlowResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
