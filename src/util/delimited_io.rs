
use anyhow::Context;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Returns true if the path ends with .gz
fn is_gzip(filename: &Path) -> bool {
    filename.extension().unwrap_or_default() == "gz"
}

/// Opens a file for reading, transparently decompressing gzip (including BGZF) if the name ends with .gz
/// # Arguments
/// * `filename` - the file path to open
/// # Errors
/// * if the file does not open
pub fn open_input(filename: &Path) -> anyhow::Result<Box<dyn Read>> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn Read> = if is_gzip(filename) {
        Box::new(flate2::read::MultiGzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

/// Creates a file for writing, gzip compressing it if the name ends with .gz
/// # Arguments
/// * `filename` - the file path to create
/// # Errors
/// * if the file cannot be created
pub fn create_output(filename: &Path) -> anyhow::Result<Box<dyn Write>> {
    let file = File::create(filename)
        .with_context(|| format!("Error while creating {filename:?}:"))?;
    let writer: Box<dyn Write> = if is_gzip(filename) {
        Box::new(flate2::write::GzEncoder::new(file, flate2::Compression::best()))
    } else {
        Box::new(file)
    };
    Ok(writer)
}

/// Picks the output delimiter from the file name: "," for .csv(.gz), tab for anything else
pub fn output_delimiter(filename: &Path) -> u8 {
    let stem_path = if is_gzip(filename) {
        // strip the .gz and look at what is underneath
        filename.file_stem().map(Path::new).unwrap_or(filename)
    } else {
        filename
    };
    if stem_path.extension().unwrap_or_default() == "csv" { b',' } else { b'\t' }
}

/// Opens a CSV/TSV writer with the delimiter chosen by [`output_delimiter`]
/// # Arguments
/// * `filename` - the output path, .csv/.tsv with optional .gz
/// * `has_headers` - if true, serialized structs will write a header row
pub fn open_delimited_writer(filename: &Path, has_headers: bool) -> anyhow::Result<csv::Writer<Box<dyn Write>>> {
    let delimiter = output_delimiter(filename);
    let writer = create_output(filename)?;
    Ok(csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .from_writer(writer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_output_delimiter() {
        assert_eq!(output_delimiter(&PathBuf::from("out/summary.csv")), b',');
        assert_eq!(output_delimiter(&PathBuf::from("out/summary.csv.gz")), b',');
        assert_eq!(output_delimiter(&PathBuf::from("out/summary.tsv")), b'\t');
        assert_eq!(output_delimiter(&PathBuf::from("out/summary.tsv.gz")), b'\t');
        assert_eq!(output_delimiter(&PathBuf::from("summary")), b'\t');
    }

    #[test]
    fn test_gzip_round_trip() {
        let out_fn = std::env::temp_dir().join(format!("callcompare_io_{}.txt.gz", std::process::id()));
        {
            let mut writer = create_output(&out_fn).unwrap();
            writer.write_all(b"line one\nline two\n").unwrap();
            writer.flush().unwrap();
        }

        let mut contents = String::new();
        open_input(&out_fn).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "line one\nline two\n");
        std::fs::remove_file(&out_fn).unwrap();
    }

    #[test]
    fn test_missing_input() {
        assert!(open_input(&PathBuf::from("test_data/does_not_exist.tsv")).is_err());
    }
}
