//! Printing generations to stdout, without the TUI.

use rlife_lib::{Driver, Frame, Renderer};
use std::io::{self, Write};

/// Writes each frame after a header line, followed by an empty line.
pub(crate) struct Printer<W: Write> {
    out: W,
}

impl<W: Write> Printer<W> {
    pub(crate) fn new(out: W) -> Self {
        Printer { out }
    }
}

impl<W: Write> Renderer for Printer<W> {
    type Error = io::Error;

    fn render(&mut self, frame: Frame<'_>) -> io::Result<()> {
        writeln!(
            self.out,
            "Gen: {}  Cells: {}",
            frame.generation,
            frame.population()
        )?;
        write!(self.out, "{}", frame.text)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Runs the driver until it stops, printing every generation.
pub(crate) async fn run(mut driver: Driver) -> io::Result<()> {
    let stdout = io::stdout();
    let mut printer = Printer::new(stdout.lock());
    let mut sleep = tokio::time::sleep;
    driver.run(&mut printer, &mut sleep).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlife_lib::{Coord, Rule, World};
    use std::{future, time::Duration};

    #[test]
    fn blinker() -> Result<(), Box<dyn std::error::Error>> {
        let blinker = (0..3).map(|col| Coord::new(1, col));
        let world = World::from_cells(blinker, Rule::default())?;
        let mut driver = Driver::new(world, Duration::ZERO).set_generations(Some(2));

        let mut printer = Printer::new(Vec::new());
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        runtime.block_on(driver.run(&mut printer, &mut |_: Duration| future::ready(())))?;

        let output = String::from_utf8(printer.out)?;
        assert_eq!(output, "Gen: 0  Cells: 3\nooo\n\nGen: 1  Cells: 3\no\no\no\n\n");
        Ok(())
    }
}
