//! `search` and `verify` subcommands: file handling around the library calls.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use atrail::graph::Embedding;
use atrail::io::{read_edge_code, read_trail, write_trail};
use atrail::{search_embedding, verify_report, SearchCfg, SearchOutcome, Verdict};

use crate::provenance::{write_sidecar, Payload};

/// Arguments of `atrail search`; recorded as-is in the provenance sidecar.
#[derive(Clone, Debug, Serialize)]
pub struct SearchArgs {
    pub edge_code: PathBuf,
    pub trail: Option<PathBuf>,
    pub ntrail: Option<PathBuf>,
    pub start: usize,
    pub max_splits: Option<u64>,
    pub verify: bool,
}

impl SearchArgs {
    pub fn new(edge_code: PathBuf) -> Self {
        Self {
            edge_code,
            trail: None,
            ntrail: None,
            start: 0,
            max_splits: None,
            verify: true,
        }
    }

    fn cfg(&self) -> SearchCfg {
        SearchCfg {
            start: self.start,
            split_budget: self.max_splits,
            verify: self.verify,
        }
    }

    /// `--trail`, else the edge-code path with extension `.trail`.
    pub fn trail_path(&self) -> PathBuf {
        self.trail
            .clone()
            .unwrap_or_else(|| self.edge_code.with_extension("trail"))
    }

    /// `--ntrail`, else the edge-code path with extension `.ntrail`.
    pub fn ntrail_path(&self) -> PathBuf {
        self.ntrail
            .clone()
            .unwrap_or_else(|| self.edge_code.with_extension("ntrail"))
    }
}

/// Search and write both trails plus a sidecar. Returns false if the
/// embedding has no A-trail; nothing is written then.
pub fn search(args: &SearchArgs) -> Result<bool> {
    let embedding = load_edge_code(&args.edge_code)?;
    tracing::info!(
        input = %args.edge_code.display(),
        vertices = embedding.number_of_vertices(),
        edges = embedding.number_of_edges(),
        "read edge code"
    );
    let outcome = search_embedding(&embedding, args.cfg())
        .with_context(|| format!("searching {}", args.edge_code.display()))?;
    let trail = match outcome {
        SearchOutcome::Found(trail) => trail,
        SearchOutcome::NotEulerian => {
            tracing::error!(input = %args.edge_code.display(), "graph is not Eulerian, no A-trail");
            return Ok(false);
        }
        SearchOutcome::NoAtrail => {
            tracing::error!(input = %args.edge_code.display(), "no A-trail exists for this embedding");
            return Ok(false);
        }
    };

    let trail_path = args.trail_path();
    let ntrail_path = args.ntrail_path();
    save_trail(&trail_path, &trail.edge_trail)?;
    save_trail(&ntrail_path, &trail.vertex_trail)?;
    let payload = Payload::new("search", serde_json::to_value(args)?)
        .output(&trail_path)
        .output(&ntrail_path);
    let sidecar = write_sidecar(&trail_path, payload)?;
    tracing::info!(
        trail = %trail_path.display(),
        ntrail = %ntrail_path.display(),
        provenance = %sidecar.display(),
        "wrote A-trail"
    );
    Ok(true)
}

/// Check an edge-trail file against an edge-code file.
pub fn verify(edge_code: &Path, trail: &Path) -> Result<Verdict> {
    let embedding = load_edge_code(edge_code)?;
    let file = File::open(trail).with_context(|| format!("opening {}", trail.display()))?;
    let edges =
        read_trail(BufReader::new(file)).with_context(|| format!("parsing {}", trail.display()))?;
    let verdict = verify_report(&embedding, &edges);
    if verdict.is_valid() {
        tracing::info!(trail = %trail.display(), "trail is an A-trail");
    } else {
        tracing::warn!(trail = %trail.display(), reason = %verdict, "trail is not an A-trail");
    }
    Ok(verdict)
}

fn load_edge_code(path: &Path) -> Result<Embedding> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_edge_code(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

fn save_trail(path: &Path, trail: &[usize]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut out = BufWriter::new(
        File::create(path).with_context(|| format!("creating {}", path.display()))?,
    );
    write_trail(&mut out, trail).with_context(|| format!("writing {}", path.display()))?;
    out.flush()
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrail::gen::{leg_bouquet, octahedron};
    use atrail::io::{parse_trail, write_edge_code};
    use serde_json::Value;
    use tempfile::tempdir;

    fn write_code(path: &Path, emb: &Embedding) {
        let mut buf = Vec::new();
        write_edge_code(&mut buf, emb).unwrap();
        fs::write(path, buf).unwrap();
    }

    #[test]
    fn search_writes_trails_next_to_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("octa.edgecode");
        write_code(&input, &octahedron());

        assert!(search(&SearchArgs::new(input.clone())).unwrap());
        let trail_path = dir.path().join("octa.trail");
        let ntrail_path = dir.path().join("octa.ntrail");
        let edges = parse_trail(&fs::read_to_string(&trail_path).unwrap()).unwrap();
        let vertices = parse_trail(&fs::read_to_string(&ntrail_path).unwrap()).unwrap();
        assert_eq!(edges.len(), 12);
        assert_eq!(vertices.len(), 13);
        assert_eq!(vertices.first(), vertices.last());

        let sidecar = dir.path().join("octa.provenance.json");
        let parsed: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(parsed["command"], "search");
        assert_eq!(parsed["params"]["verify"], true);

        assert!(verify(&input, &trail_path).unwrap().is_valid());
    }

    #[test]
    fn explicit_output_paths_are_used() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("legs.txt");
        write_code(&input, &leg_bouquet(&[0, 0, 1, 1, 2, 2]));
        let mut args = SearchArgs::new(input.clone());
        args.trail = Some(dir.path().join("out/legs.edges"));
        args.ntrail = Some(dir.path().join("out/legs.nodes"));
        assert!(search(&args).unwrap());
        assert!(dir.path().join("out/legs.edges").exists());
        assert!(dir.path().join("out/legs.nodes").exists());
        assert!(dir.path().join("out/legs.provenance.json").exists());
        assert!(!dir.path().join("legs.trail").exists());
    }

    #[test]
    fn no_atrail_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("crossed.edgecode");
        write_code(&input, &leg_bouquet(&[0, 0, 1, 2, 2, 1]));
        assert!(!search(&SearchArgs::new(input)).unwrap());
        assert!(!dir.path().join("crossed.trail").exists());
    }

    #[test]
    fn verify_reports_crossing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bouquet.edgecode");
        write_code(&input, &leg_bouquet(&[0, 0, 1, 1, 2, 2]));
        let trail = dir.path().join("bouquet.trail");
        // Pairs edge 1 with edge 3 at the centre; they are two slots apart.
        fs::write(&trail, "0 1 3 2 4 5\n").unwrap();
        let verdict = verify(&input, &trail).unwrap();
        assert!(!verdict.is_valid());
    }

    #[test]
    fn missing_input_is_an_error_with_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.edgecode");
        let err = search(&SearchArgs::new(input)).unwrap_err();
        assert!(format!("{err:#}").contains("absent.edgecode"));
    }

    #[test]
    fn budget_exhaustion_is_an_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("torus.edgecode");
        write_code(&input, &atrail::gen::triangulated_torus(4));
        let mut args = SearchArgs::new(input);
        args.max_splits = Some(2);
        let err = search(&args).unwrap_err();
        assert!(format!("{err:#}").contains("split attempts"));
    }
}
