//! `.npz` export of solver results for external plotting.
//!
//! The complex state history is stored as separate `states_re` and
//! `states_im` real arrays.

use std::{ fs::File, io::BufWriter, path::Path };
use ndarray as nd;
use ndarray_npy::NpzWriter;
use num_complex::Complex64 as C64;
use crate::{
    error::Result,
    solve::{ SolvedField, SolvedPath },
};

fn split_complex(arr: &nd::Array2<C64>)
    -> (nd::Array2<f64>, nd::Array2<f64>)
{
    (arr.mapv(|a| a.re), arr.mapv(|a| a.im))
}

/// Write a [`SolvedField`] to a compressed `.npz` archive with arrays
/// `time`, `fields`, `path`, `states_re`, `states_im`.
pub fn write_solved_field<P>(path: P, solved: &SolvedField) -> Result<()>
where P: AsRef<Path>
{
    let mut npz = NpzWriter::new_compressed(
        BufWriter::new(File::create(path)?));
    npz.add_array("time", &solved.time)?;
    npz.add_array("fields", &solved.fields)?;
    npz.add_array("path", &solved.path)?;
    let (re, im) = split_complex(&solved.states);
    npz.add_array("states_re", &re)?;
    npz.add_array("states_im", &im)?;
    npz.finish()?;
    Ok(())
}

/// Write a [`SolvedPath`] to a compressed `.npz` archive with arrays
/// `time`, `path`, `states_re`, `states_im`.
pub fn write_solved_path<P>(path: P, solved: &SolvedPath) -> Result<()>
where P: AsRef<Path>
{
    let mut npz = NpzWriter::new_compressed(
        BufWriter::new(File::create(path)?));
    npz.add_array("time", &solved.time)?;
    npz.add_array("path", &solved.path)?;
    let (re, im) = split_complex(&solved.states);
    npz.add_array("states_re", &re)?;
    npz.add_array("states_im", &im)?;
    npz.finish()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::solve::{ FieldToPath, Solve };

    #[test]
    fn solved_path_writes_npz() {
        let fields: nd::Array2<f64> = nd::Array2::zeros((4, 2));
        let mut solver = FieldToPath::new(&fields, 1000.0).unwrap();
        solver.solve().unwrap();
        let solved = solver.export().unwrap();
        let out = std::env::temp_dir().join("rotor_control_solved_path.npz");
        write_solved_path(&out, &solved).unwrap();
        assert!(out.exists());
        std::fs::remove_file(&out).unwrap();
    }
}
