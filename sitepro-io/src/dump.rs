use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sitepro_core::models::SiteProfile;

pub trait DumpWrite {
    ///
    /// Write retained sites and their binned profiles to disk, one site per
    /// line: `chrom\tstart\tend\t[name\t]v1,v2,...,vN`
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_dump<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;
}

impl DumpWrite for [SiteProfile] {
    fn write_dump<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = BufWriter::new(File::create(path)?);

        for profile in self {
            writeln!(file, "{}", profile.as_string())?;
        }

        file.flush()?;
        Ok(())
    }
}
