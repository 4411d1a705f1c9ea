// std imports
use std::path::Path;

// 3rd party imports
use anyhow::Result;
use clap::{Parser, Subcommand};
use fallible_iterator::FallibleIterator;
use indicatif::ProgressStyle;
use serde_json::json;
use tracing::{debug, info, Level};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

// internal imports
use tagmatch::biology::tag_matching::sequence_matching::{
    MatchingType, SequenceMatchingParameters,
};
use tagmatch::biology::tag_matching::tag_matcher::TagMatcher;
use tagmatch::entities::modification::{ModificationRegistry, ModificationType};
use tagmatch::entities::tag::{Tag, TagComponent};
use tagmatch::io::fasta::reader::Reader as FastaReader;
use tagmatch::io::modification_csv::reader::Reader as ModificationReader;
use tagmatch::tools::display::peptide_match_to_string;

const DEFAULT_MASS_TOLERANCE: f64 = 0.02;
const DEFAULT_MAX_X_SHARE: f64 = 0.25;
/// Buffer size for reading FASTA files
const FASTA_READER_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Subcommand)]
enum Commands {
    /// Searches a tag against every protein of a FASTA file
    Search {
        /// Path to the protein FASTA file
        fasta_file: String,
        /// The tag, e.g. `EVK[114.042927]TSR` (bracketed masses are gaps in Dalton)
        tag: String,
        /// Path to a modification CSV file with the columns
        /// name, amino_acids, mass_delta, mod_type, position
        #[arg(long)]
        modification_file: Option<String>,
        /// Mass tolerance in Dalton
        #[arg(long, default_value_t = DEFAULT_MASS_TOLERANCE)]
        mass_tolerance: f64,
        /// How sequenced stretches are compared: strict, ambiguity_aware or indistinguishable
        #[arg(long, default_value = "indistinguishable")]
        matching_type: String,
        /// Highest tolerated share of X residues per compared stretch
        #[arg(long, default_value_t = DEFAULT_MAX_X_SHARE)]
        max_x_share: f64,
        /// Report applied fixed modifications as modification matches
        #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
        report_fixed_modifications: bool,
        /// Print matches as JSON lines instead of human-readable text
        #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[command(name = "tagmatch")]
struct Cli {
    /// Verbosity level
    /// 0 - Error
    /// 1 - Warn
    /// 2 - Info
    /// 3 - Debug
    /// > 3 - Trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[allow(clippy::too_many_arguments)]
fn search(
    fasta_file: &Path,
    tag: &str,
    modification_file: Option<&Path>,
    mass_tolerance: f64,
    matching_type: &str,
    max_x_share: f64,
    report_fixed_modifications: bool,
    as_json: bool,
) -> Result<()> {
    let tag: Tag = tag.parse()?;
    let anchor_component_index = match tag.longest_sequence_component() {
        Some(index) => index,
        None => anyhow::bail!("the tag holds mass gaps only, nothing to anchor a match"),
    };
    let anchor_residues = match &tag.get_components()[anchor_component_index] {
        TagComponent::Sequence(sequence) => sequence.get_residues().clone(),
        TagComponent::MassGap(_) => unreachable!(),
    };

    let mut registry = ModificationRegistry::new();
    let mut fixed_modifications: Vec<String> = Vec::new();
    let mut variable_modifications: Vec<String> = Vec::new();
    if let Some(modification_file) = modification_file {
        for (modification, modification_type) in ModificationReader::read(modification_file)? {
            match modification_type {
                ModificationType::Fixed => {
                    fixed_modifications.push(modification.get_name().clone())
                }
                ModificationType::Variable => {
                    variable_modifications.push(modification.get_name().clone())
                }
            }
            registry.register(modification);
        }
    }
    info!(
        "{} fixed and {} variable modifications",
        fixed_modifications.len(),
        variable_modifications.len()
    );

    let matcher = TagMatcher::new(&fixed_modifications, &variable_modifications, &registry)?;
    let sequence_matching = SequenceMatchingParameters::new(
        matching_type.parse::<MatchingType>()?,
        max_x_share,
    );

    let mut reader = FastaReader::new(fasta_file, FASTA_READER_BUFFER_SIZE)?;
    info!("searching `{}` in {} proteins", tag, reader.count_proteins()?);

    let mut protein_counter: usize = 0;
    let mut peptide_counter: usize = 0;
    while let Some(protein) = reader.next()? {
        protein_counter += 1;
        let sequence = protein.get_sequence();
        if sequence.len() < anchor_residues.len() {
            continue;
        }
        for tag_index in 0..=sequence.len() - anchor_residues.len() {
            let target = &sequence[tag_index..tag_index + anchor_residues.len()];
            if !sequence_matching.matches(&anchor_residues, target) {
                continue;
            }
            debug!(
                "anchor hit in `{}` at index {}",
                protein.get_accession(),
                tag_index
            );
            let matches = matcher.get_peptide_matches(
                &tag,
                sequence,
                tag_index,
                anchor_component_index,
                &sequence_matching,
                mass_tolerance,
                report_fixed_modifications,
            )?;
            for (start_index, peptides) in matches.iter() {
                for peptide in peptides {
                    peptide_counter += 1;
                    if as_json {
                        println!(
                            "{}",
                            json!({
                                "accession": protein.get_accession(),
                                "start_index": start_index,
                                "peptide": peptide,
                            })
                        );
                    } else {
                        println!(
                            "{}",
                            peptide_match_to_string(
                                protein.get_accession(),
                                *start_index,
                                peptide
                            )
                        );
                    }
                }
            }
        }
    }
    info!(
        "{} consistent peptides in {} proteins",
        peptide_counter, protein_counter
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let verbosity = match args.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(verbosity.into());

    let indicatif_layer = IndicatifLayer::new()
        .with_progress_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {span_child_prefix} {span_name} {span_fields} {wide_msg} {elapsed}",
            )
            .unwrap(),
        )
        .with_span_child_prefix_symbol("↳ ")
        .with_span_child_prefix_indent(" ");

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .with(filter)
        .init();

    match args.command {
        Commands::Search {
            fasta_file,
            tag,
            modification_file,
            mass_tolerance,
            matching_type,
            max_x_share,
            report_fixed_modifications,
            json,
        } => search(
            Path::new(&fasta_file),
            &tag,
            modification_file.as_deref().map(Path::new),
            mass_tolerance,
            &matching_type,
            max_x_share,
            report_fixed_modifications,
            json,
        ),
    }
}
