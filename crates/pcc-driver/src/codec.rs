use std::io::BufRead;

use pcc_decoder::{PlyReader, Value};

use crate::binding::{ElementBinding, PropertyBinding, PropertyCodec};
use crate::error::DriverError;

/// Consumer of the decoded data section.
///
/// [`stream_records`] calls these hooks in file order:
///
/// ```text
///   for each element:
///     for each record:
///       begin_record
///         scalar                                  (scalar property)
///         list_begin, list_element × n, list_end  (list property)
///       end_record
///     end_element
/// ```
pub(crate) trait RecordVisitor {
    fn begin_record(&mut self, element: &ElementBinding, record: u64) -> Result<(), DriverError>;

    fn scalar(&mut self, property: &PropertyBinding, value: Value<'_>) -> Result<(), DriverError>;

    fn list_begin(&mut self, property: &PropertyBinding, count: Value<'_>) -> Result<(), DriverError>;

    fn list_element(&mut self, property: &PropertyBinding, value: Value<'_>) -> Result<(), DriverError>;

    fn list_end(&mut self, _property: &PropertyBinding) -> Result<(), DriverError> {
        Ok(())
    }

    fn end_record(&mut self, element: &ElementBinding, record: u64) -> Result<(), DriverError>;

    fn end_element(&mut self, _element: &ElementBinding) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Decode the whole data section, one value per bound property, and
/// hand every value to `visitor`.
///
/// Nothing is buffered across records; the visitor decides what, if
/// anything, to keep.
pub(crate) fn stream_records<R: BufRead, V: RecordVisitor>(
    reader: &mut PlyReader<R>,
    elements: &[ElementBinding],
    visitor: &mut V,
) -> Result<(), DriverError> {
    for (index, element) in elements.iter().enumerate() {
        for record in 0..element.count {
            reader.begin_record(index, record)?;
            visitor.begin_record(element, record)?;
            for property in &element.properties {
                match property.codec {
                    PropertyCodec::Scalar(codec) => {
                        let value = reader.read_scalar(codec)?;
                        visitor.scalar(property, value)?;
                    }
                    PropertyCodec::List(list) => {
                        let count = reader.read_scalar(list.size)?;
                        let length = count.scalar.to_index().ok_or_else(|| {
                            DriverError::InvalidListLength {
                                element: element.name.clone(),
                                record,
                                value: count.scalar.to_string(),
                            }
                        })?;
                        visitor.list_begin(property, count)?;
                        for _ in 0..length {
                            let value = reader.read_scalar(list.element)?;
                            visitor.list_element(property, value)?;
                        }
                        visitor.list_end(property)?;
                    }
                }
            }
            reader.end_record()?;
            visitor.end_record(element, record)?;
        }
        visitor.end_element(element)?;
    }
    reader.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::bind;

    /// Records every hook as a line of text.
    #[derive(Default)]
    struct Trace(Vec<String>);

    impl RecordVisitor for Trace {
        fn begin_record(&mut self, element: &ElementBinding, record: u64) -> Result<(), DriverError> {
            self.0.push(format!("begin {} {record}", element.name));
            Ok(())
        }

        fn scalar(&mut self, _: &PropertyBinding, value: Value<'_>) -> Result<(), DriverError> {
            self.0.push(format!("scalar {}", value.scalar));
            Ok(())
        }

        fn list_begin(&mut self, _: &PropertyBinding, count: Value<'_>) -> Result<(), DriverError> {
            self.0.push(format!("list {}", count.scalar));
            Ok(())
        }

        fn list_element(&mut self, _: &PropertyBinding, value: Value<'_>) -> Result<(), DriverError> {
            self.0.push(format!("item {}", value.scalar));
            Ok(())
        }

        fn list_end(&mut self, _: &PropertyBinding) -> Result<(), DriverError> {
            self.0.push("end list".to_string());
            Ok(())
        }

        fn end_record(&mut self, element: &ElementBinding, record: u64) -> Result<(), DriverError> {
            self.0.push(format!("end {} {record}", element.name));
            Ok(())
        }

        fn end_element(&mut self, element: &ElementBinding) -> Result<(), DriverError> {
            self.0.push(format!("done {}", element.name));
            Ok(())
        }
    }

    fn trace(input: &[u8]) -> Result<Vec<String>, DriverError> {
        let mut reader = PlyReader::new(input);
        let elements = bind(reader.read_header()?);
        let mut visitor = Trace::default();
        stream_records(&mut reader, &elements, &mut visitor)?;
        Ok(visitor.0)
    }

    #[test]
    fn hooks_follow_declaration_order() {
        let input = b"ply\nformat ascii 1.0\n\
            element vertex 1\nproperty float x\nproperty int i\n\
            element face 2\nproperty list uchar int vertex_indices\n\
            end_header\n\
            0.5 7\n\
            2 1 2\n\
            0\n";
        let lines = trace(input).unwrap();
        assert_eq!(
            lines,
            [
                "begin vertex 0",
                "scalar 0.5",
                "scalar 7",
                "end vertex 0",
                "done vertex",
                "begin face 0",
                "list 2",
                "item 1",
                "item 2",
                "end list",
                "end face 0",
                "begin face 1",
                "list 0",
                "end list",
                "end face 1",
                "done face",
            ]
        );
    }

    #[test]
    fn binary_list_lengths_drive_element_reads() {
        let mut input = b"ply\nformat binary_little_endian 1.0\n\
            element face 2\nproperty list ushort float w\nend_header\n"
            .to_vec();
        input.extend_from_slice(&1u16.to_le_bytes());
        input.extend_from_slice(&1.5f32.to_le_bytes());
        input.extend_from_slice(&2u16.to_le_bytes());
        input.extend_from_slice(&(-1.0f32).to_le_bytes());
        input.extend_from_slice(&4.0f32.to_le_bytes());
        let lines = trace(&input).unwrap();
        let items: Vec<_> = lines.iter().filter(|l| l.starts_with("item")).collect();
        assert_eq!(items, ["item 1.5", "item -1", "item 4"]);
    }

    #[test]
    fn empty_element_still_ends() {
        let input = b"ply\nformat ascii 1.0\nelement vertex 0\nproperty float x\nend_header\n";
        assert_eq!(trace(input).unwrap(), ["done vertex"]);
    }
}
