/// Implementation of `pcc inspect`.
///
/// # Output format
///
/// ```text
/// mesh.ply: binary_little_endian 1.0
/// comment made by scanner
/// element vertex 1024
///   float32 x
///   float32 y
///   float32 z
/// element face 2040
///   list uint8 int32 vertex_indices
/// ```
///
/// With `--json` the same information is printed as one JSON object.
use anyhow::{Context, Result};
use pcc_types::{Header, HeaderLine};
use serde::Serialize;

use crate::InspectArgs;
use crate::stream::{display_name, open_input};

#[derive(Serialize)]
struct HeaderSummary<'a> {
    file: &'a str,
    format: String,
    version: &'a str,
    comments: Vec<&'a str>,
    elements: Vec<ElementSummary<'a>>,
}

#[derive(Serialize)]
struct ElementSummary<'a> {
    name: &'a str,
    count: u64,
    properties: Vec<PropertySummary<'a>>,
}

#[derive(Serialize)]
struct PropertySummary<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: String,
}

impl<'a> HeaderSummary<'a> {
    fn new(file: &'a str, header: &'a Header) -> Self {
        let comments = header
            .lines
            .iter()
            .filter_map(|line| match line {
                HeaderLine::Comment(text) | HeaderLine::ObjInfo(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let elements = header
            .elements
            .iter()
            .map(|element| ElementSummary {
                name: &element.name,
                count: element.count,
                properties: element
                    .properties
                    .iter()
                    .map(|p| PropertySummary {
                        name: &p.name,
                        kind: p.kind.to_string(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            file,
            format: header.encoding.to_string(),
            version: &header.version,
            comments,
            elements,
        }
    }
}

/// Run the `pcc inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its header is not
/// valid PLY.
pub fn run(args: &InspectArgs) -> Result<()> {
    let name = display_name(Some(&args.file));
    let input = open_input(Some(&args.file))?;
    let header =
        pcc_driver::inspect(input, &name).with_context(|| format!("failed to inspect {name}"))?;
    let summary = HeaderSummary::new(&name, &header);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}: {} {}", summary.file, summary.format, summary.version);
    for comment in &summary.comments {
        println!("{comment}");
    }
    for element in &summary.elements {
        println!("element {} {}", element.name, element.count);
        for property in &element.properties {
            println!("  {} {}", property.kind, property.name);
        }
    }
    Ok(())
}
