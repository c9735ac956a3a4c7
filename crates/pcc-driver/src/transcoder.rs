use std::io::{BufRead, Write};

use pcc_decoder::{DecodeError, PlyReader, Value};
use pcc_encoder::PlyWriter;
use pcc_types::HeaderLine;
use pcc_wire::Encoding;

use crate::binding::{ElementBinding, ElementKind, PropertyBinding, Role, bind};
use crate::codec::{RecordVisitor, stream_records};
use crate::config::{FilterMode, TranscodeConfig};
use crate::error::DriverError;
use crate::filter::{ContainmentFilter, Verdict};
use crate::mesh::{BoundaryShape, MeshAccumulator};
use crate::oracle::{ContainmentOracle, RayCastOracle};

/// Record counts for one element of a finished pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementReport {
    pub name: String,
    /// Count declared in the input header.
    pub declared: u64,
    /// Records written unchanged to the output.
    pub written: u64,
}

/// Summary of a finished [`Transcoder::convert`] or
/// [`Transcoder::clean`] pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscodeReport {
    pub input_encoding: Encoding,
    pub output_encoding: Encoding,
    pub elements: Vec<ElementReport>,
    pub vertices_kept: u64,
    pub vertices_removed: u64,
    pub bytes_written: u64,
}

/// A transcoding session.
///
/// All per-pass state lives in locals of each call, so one `Transcoder`
/// can run any number of passes, and independent transcoders never
/// share anything.
///
/// ```text
///   boundary.ply ──▶ load_boundary() ──▶ BoundaryShape
///                                             │
///   input.ply ─────▶ clean() ◀────────────────┘ ──▶ output.ply
///
///   input.ply ─────▶ convert() ───────────────────▶ output.ply
/// ```
///
/// Header lines are written as soon as they are read, except in
/// [`FilterMode::Drop`], where output is held back until the vertex
/// element has been filtered so its count can be corrected.
pub struct Transcoder {
    config: TranscodeConfig,
    oracle: Box<dyn ContainmentOracle>,
}

impl Transcoder {
    /// Create a transcoder using [`RayCastOracle`] for containment.
    #[must_use]
    pub fn new(config: TranscodeConfig) -> Self {
        Self {
            config,
            oracle: Box::new(RayCastOracle),
        }
    }

    /// Replace the containment oracle.
    #[must_use]
    pub fn with_oracle(mut self, oracle: Box<dyn ContainmentOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    #[must_use]
    pub fn config(&self) -> &TranscodeConfig {
        &self.config
    }

    /// Read a boundary mesh. Nothing is written anywhere.
    ///
    /// # Errors
    ///
    /// - [`DriverError::Decode`] for malformed input.
    /// - [`DriverError::MissingElement`] / [`DriverError::MissingCoordinate`]
    ///   if the input has no usable vertex or face element.
    /// - Any mesh validation error from [`MeshAccumulator`].
    pub fn load_boundary<R: BufRead>(&self, input: R) -> Result<BoundaryShape, DriverError> {
        let name = &self.config.boundary_name;
        let mut reader = PlyReader::new(input).with_input_name(name.as_str());
        let elements = bind(reader.read_header()?);

        let vertex = elements
            .iter()
            .find(|e| e.kind == ElementKind::Vertex)
            .ok_or_else(|| DriverError::MissingElement {
                input: name.clone(),
                element: "vertex",
            })?;
        if let Some(axis) = vertex.missing_axes().next() {
            return Err(DriverError::MissingCoordinate {
                input: name.clone(),
                axis,
            });
        }
        if !elements.iter().any(ElementBinding::has_face_list) {
            return Err(DriverError::MissingElement {
                input: name.clone(),
                element: "face",
            });
        }

        let mut mesh = MeshAccumulator::new(self.config.face_arity);
        stream_records(&mut reader, &elements, &mut mesh)?;
        let shape = mesh.finish()?;
        tracing::info!(
            input = %name,
            vertices = shape.vertices().len(),
            triangles = shape.triangles().len(),
            "boundary loaded"
        );
        Ok(shape)
    }

    /// Transcode `input` to `output` without filtering.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Decode`] or [`DriverError::Encode`] if the
    /// pass cannot complete. Records are streamed, so on error `output`
    /// may already hold a prefix of the result; callers writing to a file
    /// should stage it and discard it on failure.
    pub fn convert<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<TranscodeReport, DriverError> {
        self.run(input, output, None)
    }

    /// Transcode `input` to `output`, removing vertices outside `shape`.
    ///
    /// Other elements pass through unchanged; face indices are not
    /// renumbered.
    ///
    /// # Errors
    ///
    /// As [`convert`](Self::convert), plus
    /// [`DriverError::MissingCoordinate`] if the vertex element lacks
    /// `x`, `y` or `z`. As with `convert`, `output` may hold a partial
    /// result on error.
    pub fn clean<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
        shape: &BoundaryShape,
    ) -> Result<TranscodeReport, DriverError> {
        self.run(input, output, Some(shape))
    }

    fn run<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
        shape: Option<&BoundaryShape>,
    ) -> Result<TranscodeReport, DriverError> {
        let name = &self.config.input_name;
        let mut reader = PlyReader::new(input).with_input_name(name.as_str());

        // Lines before `format` wait until the output encoding is known.
        let mut pending = Vec::new();
        let (input_encoding, version) = loop {
            match reader.next_header_line()? {
                Some(HeaderLine::Format { encoding, version }) => break (encoding, version),
                Some(line) => pending.push(line),
                None => return Err(DecodeError::HeaderIncomplete.into()),
            }
        };
        let output_encoding = self.config.output.resolve(input_encoding);
        tracing::debug!(
            input = %name,
            from = %input_encoding,
            to = %output_encoding,
            filtering = shape.is_some(),
            "transcoding"
        );

        let mut writer = PlyWriter::new(output, output_encoding);
        if shape.is_some() && self.config.filter == FilterMode::Drop {
            writer.defer();
        }
        for line in &pending {
            writer.write_header_line(line)?;
        }
        writer.write_header_line(&HeaderLine::Format {
            encoding: output_encoding,
            version,
        })?;
        while let Some(line) = reader.next_header_line()? {
            writer.write_header_line(&line)?;
        }

        let header = reader.header().ok_or(DecodeError::HeaderIncomplete)?;
        let elements = bind(header);

        let filter = match shape {
            Some(shape) => {
                match elements.iter().find(|e| e.kind == ElementKind::Vertex) {
                    Some(vertex) => {
                        if let Some(axis) = vertex.missing_axes().next() {
                            return Err(DriverError::MissingCoordinate {
                                input: name.clone(),
                                axis,
                            });
                        }
                    }
                    None => tracing::warn!("{name}: no vertex element, nothing to filter"),
                }
                Some(ContainmentFilter::new(shape, self.oracle.as_ref()))
            }
            None => None,
        };

        let mut emitter = Emitter {
            writer,
            filter,
            mode: self.config.filter,
            sentinel: &self.config.sentinel,
            written: 0,
            counts: Vec::with_capacity(elements.len()),
        };
        stream_records(&mut reader, &elements, &mut emitter)?;

        let Emitter {
            mut writer,
            filter,
            counts,
            ..
        } = emitter;
        writer.release()?;
        let bytes_written = writer.bytes_written();
        writer.finish()?;

        let reports: Vec<ElementReport> = elements
            .iter()
            .zip(counts)
            .map(|(element, written)| ElementReport {
                name: element.name.clone(),
                declared: element.count,
                written,
            })
            .collect();
        let (vertices_kept, vertices_removed) = match &filter {
            Some(filter) => (filter.kept(), filter.removed()),
            None => (
                reports
                    .iter()
                    .find(|r| r.name == "vertex")
                    .map_or(0, |r| r.written),
                0,
            ),
        };

        tracing::debug!(input = %name, bytes_written, vertices_kept, vertices_removed, "pass complete");
        Ok(TranscodeReport {
            input_encoding,
            output_encoding,
            elements: reports,
            vertices_kept,
            vertices_removed,
            bytes_written,
        })
    }
}

/// Main-pass consumer: re-encodes every decoded value and applies the
/// containment filter to vertex records.
struct Emitter<'a, W: Write> {
    writer: PlyWriter<W>,
    filter: Option<ContainmentFilter<'a>>,
    mode: FilterMode,
    sentinel: &'a str,
    /// Records of the current element written so far.
    written: u64,
    /// Written records per finished element.
    counts: Vec<u64>,
}

impl<W: Write> RecordVisitor for Emitter<'_, W> {
    fn begin_record(&mut self, _element: &ElementBinding, _record: u64) -> Result<(), DriverError> {
        self.writer.begin_record();
        Ok(())
    }

    fn scalar(&mut self, property: &PropertyBinding, value: Value<'_>) -> Result<(), DriverError> {
        if let (Role::Coordinate(axis), Some(filter)) = (property.role, &mut self.filter) {
            filter.stage(axis, value.scalar.to_f64());
        }
        self.writer.write_scalar(value.scalar, value.token)?;
        Ok(())
    }

    fn list_begin(&mut self, _property: &PropertyBinding, count: Value<'_>) -> Result<(), DriverError> {
        self.writer.write_scalar(count.scalar, count.token)?;
        Ok(())
    }

    fn list_element(&mut self, _property: &PropertyBinding, value: Value<'_>) -> Result<(), DriverError> {
        self.writer.write_scalar(value.scalar, value.token)?;
        Ok(())
    }

    fn end_record(&mut self, element: &ElementBinding, _record: u64) -> Result<(), DriverError> {
        let verdict = match (&mut self.filter, element.kind) {
            (Some(filter), ElementKind::Vertex) => filter.decide(),
            _ => Verdict::Keep,
        };
        match (verdict, self.mode) {
            (Verdict::Keep, _) => {
                self.writer.end_record()?;
                self.written += 1;
            }
            (Verdict::Reject, FilterMode::Drop) => self.writer.discard_record(),
            (Verdict::Reject, FilterMode::Sentinel) => self.writer.write_sentinel(self.sentinel)?,
        }
        Ok(())
    }

    fn end_element(&mut self, element: &ElementBinding) -> Result<(), DriverError> {
        if element.kind == ElementKind::Vertex && self.writer.is_deferred() {
            self.writer.set_element_count(&element.name, self.written)?;
            self.writer.release()?;
        }
        self.counts.push(std::mem::take(&mut self.written));
        Ok(())
    }
}
