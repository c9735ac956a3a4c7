/// Implementation of `pcc clean`.
///
/// The boundary is read completely before the first byte of INPUT, so
/// BOUNDARY and INPUT may not both be stdin.
use anyhow::{Context, Result, bail};
use pcc_driver::{FaceArity, FilterMode, TranscodeConfig, Transcoder};

use crate::CleanArgs;
use crate::stream::{display_name, open_input, open_output};

/// Run the `pcc clean` command.
///
/// # Errors
///
/// Returns an error if a stream cannot be opened, the boundary mesh is
/// unusable, or the input cannot be transcoded. A file OUTPUT is only
/// written when the whole pass succeeds.
pub fn run(args: &CleanArgs) -> Result<()> {
    let boundary_name = display_name(Some(&args.boundary));
    let input_name = display_name(args.input.as_deref());
    if boundary_name == "-" && input_name == "-" {
        bail!("boundary and input cannot both be read from stdin");
    }

    let config = TranscodeConfig {
        output: args.format,
        filter: if args.sentinel {
            FilterMode::Sentinel
        } else {
            FilterMode::Drop
        },
        sentinel: args.sentinel_token.clone(),
        face_arity: if args.triangulate {
            FaceArity::Triangulate
        } else {
            FaceArity::Reject
        },
        input_name,
        boundary_name,
    };
    let transcoder = Transcoder::new(config);
    let config = transcoder.config();

    let shape = transcoder
        .load_boundary(open_input(Some(&args.boundary))?)
        .with_context(|| format!("failed to load boundary {}", config.boundary_name))?;

    let input = open_input(args.input.as_deref())?;
    let mut output = open_output(args.output.as_deref())?;
    let report = transcoder
        .clean(input, &mut output, &shape)
        .with_context(|| format!("failed to clean {}", config.input_name))?;
    output.commit()?;

    tracing::info!(
        boundary_vertices = shape.vertices().len(),
        boundary_triangles = shape.triangles().len(),
        kept = report.vertices_kept,
        removed = report.vertices_removed,
        encoding = %report.output_encoding,
        "clean complete"
    );
    Ok(())
}
