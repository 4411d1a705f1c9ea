/// Module for reading protein FASTA files
pub mod fasta;
/// Module for reading modification CSV files
pub mod modification_csv;
