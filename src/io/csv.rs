use std::io::{self, Write};
use std::path::Path;

use crate::dynamics::Mode;
use crate::sim::Sample;

/// Write recorded samples as CSV.
///
/// Columns: x, then the state slots named by [`Mode::columns`].
pub fn write_trajectory<W: Write, const N: usize>(
    writer: &mut W,
    mode: Mode,
    samples: &[Sample<N>],
) -> io::Result<()> {
    if mode.state_len() != N {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} state has {} slots, samples have {}", mode, mode.state_len(), N),
        ));
    }

    writeln!(writer, "x,{}", mode.columns().join(","))?;

    for s in samples {
        write!(writer, "{:.4}", s.x)?;
        for v in s.state.iter() {
            write!(writer, ",{:.9}", v)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Write samples to a CSV file at the given path.
pub fn write_trajectory_file<P: AsRef<Path>, const N: usize>(
    path: P,
    mode: Mode,
    samples: &[Sample<N>],
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, mode, samples)?;
    file.flush()
}
