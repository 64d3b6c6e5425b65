use std::io::{self, BufRead, Write};
use std::path::Path;

use rand::Rng;
use tracing::{debug, info, warn};

use stars::catalog::CatalogHandle;
use stars::loader;
use stars::search::{self, NeighborQuery};

use crate::command::{self, Command};

pub(crate) const NOT_LOADED_MESSAGE: &str = "ERROR: Load in star data first";

/// One REPL session: the current catalog plus the tie-break random source.
#[derive(Debug)]
pub(crate) struct Session<R: Rng> {
    catalog: CatalogHandle,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(rng: R) -> Self {
        Self {
            catalog: CatalogHandle::new(),
            rng,
        }
    }

    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Executes every line of `input` until EOF, writing results to `out`.
    /// Bytes that are not valid UTF-8 are replaced, so one bad line never ends the session.
    pub fn run<I: BufRead, W: Write>(&mut self, mut input: I, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            for output in self.execute(line) {
                writeln!(out, "{output}")?;
            }
            out.flush()?;
        }
    }

    /// Runs one input line and returns the lines to print.
    pub fn execute(&mut self, line: &str) -> Vec<String> {
        match command::parse(line) {
            Ok(None) => Vec::new(),
            Ok(Some(Command::Load { path })) => self.load(&path),
            Ok(Some(Command::Neighbors(query))) => self.neighbors(&query),
            Err(err) => {
                debug!("Rejected input {:?}: {}", line, err);
                vec![format!("ERROR: {err}")]
            }
        }
    }

    /// The current catalog is only replaced when the whole file parses.
    pub fn load(&mut self, path: &Path) -> Vec<String> {
        match loader::load_file(path) {
            Ok(catalog) => {
                let count = catalog.len();
                self.catalog.replace(catalog);
                vec![format!("Read {} stars from {}", count, path.display())]
            }
            Err(err) => vec![format!("ERROR: {err}")],
        }
    }

    fn neighbors(&mut self, query: &NeighborQuery) -> Vec<String> {
        let Some(catalog) = self.catalog.snapshot() else {
            warn!("Neighbor query before any catalog was loaded");
            return vec![NOT_LOADED_MESSAGE.to_string()];
        };

        match search::search(&catalog, query, &mut self.rng) {
            Ok(ids) => {
                info!("Found {} neighbors for {:?}", ids.len(), query);
                ids.iter().map(ToString::to_string).collect()
            }
            Err(err) => vec![err.to_string()],
        }
    }
}
