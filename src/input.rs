use crate::error::ScrapeError;
use crate::results::SearchRequest;
use std::io::Read;
use std::path::Path;

/// Reads every `Brand`/`Name` row of a CSV file, in file order
pub fn load_requests(path: impl AsRef<Path>) -> Result<Vec<SearchRequest>, ScrapeError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let requests = read_requests(file)?;
    ::log::info!(
        "Loaded {} search requests from {}",
        requests.len(),
        path.display()
    );
    Ok(requests)
}

/// Reads search requests from CSV with a header row; extra columns are ignored
pub fn read_requests<R: Read>(reader: R) -> Result<Vec<SearchRequest>, ScrapeError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut requests = Vec::new();
    for row in reader.deserialize::<SearchRequest>() {
        requests.push(row?);
    }
    Ok(requests)
}
