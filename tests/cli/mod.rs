mod output_contracts;
mod parse_matrix;
mod support;
