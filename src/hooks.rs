// src/hooks.rs

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::Result;
use crate::grid::DensityGrid;

/// Grids wider or taller than this do not fit a terminal preview.
pub const PREVIEW_MAX_SIDE: usize = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookOutcome {
    Keep,
    Discard,
}

/// Runs after the image has been written. Never called by the core pipeline.
pub trait PostProcessHook {
    fn run(&mut self, grid: &DensityGrid, image_path: &Path) -> Result<HookOutcome>;
}

/// Prints visited cells as `A` to a text sink.
pub struct AsciiPreview<W: Write> {
    out: W,
}

impl<W: Write> AsciiPreview<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PostProcessHook for AsciiPreview<W> {
    fn run(&mut self, grid: &DensityGrid, _image_path: &Path) -> Result<HookOutcome> {
        log::trace!("AsciiPreview::run");
        let out = &mut self.out;
        for row in grid.rows() {
            for &count in row {
                out.write_all(if count != 0 { b"A " } else { b"  " })?;
            }
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(HookOutcome::Keep)
    }
}

/// Asks whether to keep the image until it gets a `y` or an `n`.
pub struct KeepPrompt<I: BufRead, O: Write> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> KeepPrompt<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

impl<I: BufRead, O: Write> PostProcessHook for KeepPrompt<I, O> {
    fn run(&mut self, _grid: &DensityGrid, image_path: &Path) -> Result<HookOutcome> {
        log::trace!("KeepPrompt::run");
        let Self { input, output } = self;

        writeln!(output, "Do you want to keep {}? (y/n)", image_path.display())?;
        output.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                // closed stdin: leave the file alone
                return Ok(HookOutcome::Keep);
            }
            match line.trim() {
                "y" => return Ok(HookOutcome::Keep),
                "n" => return Ok(HookOutcome::Discard),
                _ => {
                    writeln!(output, "Invalid answer, do you want to keep this image? (y/n)")?;
                    output.flush()?;
                }
            }
        }
    }
}

/// Runs `hooks` in order and stops at the first one that discards the image.
pub fn run_hooks(
    hooks: &mut [Box<dyn PostProcessHook>],
    grid: &DensityGrid,
    image_path: &Path,
) -> Result<HookOutcome> {
    for hook in hooks.iter_mut() {
        if hook.run(grid, image_path)? == HookOutcome::Discard {
            return Ok(HookOutcome::Discard);
        }
    }
    Ok(HookOutcome::Keep)
}

/// Runs `hooks` on a written image and deletes the image if one of them
/// discards it.
pub fn finish(
    hooks: &mut [Box<dyn PostProcessHook>],
    grid: &DensityGrid,
    image_path: &Path,
) -> Result<HookOutcome> {
    let outcome = run_hooks(hooks, grid, image_path)?;
    if outcome == HookOutcome::Discard {
        std::fs::remove_file(image_path)?;
        log::info!("removed {}", image_path.display());
    }
    Ok(outcome)
}
