/// Implementation of `pcc convert`.
use anyhow::{Context, Result};
use pcc_driver::{TranscodeConfig, Transcoder};

use crate::ConvertArgs;
use crate::stream::{display_name, open_input, open_output};

/// Run the `pcc convert` command.
///
/// # Errors
///
/// Returns an error if a stream cannot be opened or the input is not
/// valid PLY. A file OUTPUT is only written when the whole pass succeeds.
pub fn run(args: &ConvertArgs) -> Result<()> {
    let config = TranscodeConfig {
        output: args.format,
        input_name: display_name(args.input.as_deref()),
        ..TranscodeConfig::default()
    };
    let transcoder = Transcoder::new(config);

    let input = open_input(args.input.as_deref())?;
    let mut output = open_output(args.output.as_deref())?;
    let report = transcoder
        .convert(input, &mut output)
        .with_context(|| format!("failed to convert {}", transcoder.config().input_name))?;
    output.commit()?;

    for element in &report.elements {
        tracing::debug!(element = %element.name, records = element.written, "converted");
    }
    tracing::info!(
        from = %report.input_encoding,
        to = %report.output_encoding,
        bytes = report.bytes_written,
        "convert complete"
    );
    Ok(())
}
