//! Dump reader - parse the tag-based text format back into an Octree

use crate::core::{Line, Node, Octree, Volume};
use glam::IVec3;
use nom::{
    bytes::complete::{tag, take_while},
    character::complete::{char, i32 as nom_i32, multispace0},
    multi::many0,
    IResult,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Expected 8 children, got {0}")]
    InvalidChildCount(usize),

    #[error("Invalid label attribute: {0:?}")]
    InvalidLabel(String),

    #[error("Invalid half-extent: {0}")]
    InvalidExtent(i32),

    #[error("Trailing content after root node")]
    TrailingContent,
}

type Result<T> = std::result::Result<T, XmlError>;

/// Raw parse tree: structure as written, before validation.
struct RawNode<'a> {
    center: IVec3,
    half_dim: i32,
    content: RawContent<'a>,
}

enum RawContent<'a> {
    Lines(Vec<(IVec3, i32, &'a str)>),
    Nodes(Vec<RawNode<'a>>),
}

// Attribute like x="-12"
fn int_attr<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, i32> {
    move |input| {
        let (input, _) = multispace0(input)?;
        let (input, _) = tag(name)(input)?;
        let (input, _) = tag("=\"")(input)?;
        let (input, value) = nom_i32(input)?;
        let (input, _) = char('"')(input)?;
        Ok((input, value))
    }
}

// Attribute like char="&amp;" - raw text, unescaped later
fn str_attr<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input| {
        let (input, _) = multispace0(input)?;
        let (input, _) = tag(name)(input)?;
        let (input, _) = tag("=\"")(input)?;
        let (input, value) = take_while(|c| c != '"')(input)?;
        let (input, _) = char('"')(input)?;
        Ok((input, value))
    }
}

fn line_element(input: &str) -> IResult<&str, (IVec3, i32, &str)> {
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("<line")(input)?;
    let (input, x) = int_attr("x")(input)?;
    let (input, y) = int_attr("y")(input)?;
    let (input, z) = int_attr("z")(input)?;
    let (input, length) = int_attr("len")(input)?;
    let (input, label) = str_attr("char")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("/>")(input)?;
    Ok((input, (IVec3::new(x, y, z), length, label)))
}

fn node_element(input: &str) -> IResult<&str, RawNode<'_>> {
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("<node")(input)?;
    let (input, x) = int_attr("x")(input)?;
    let (input, y) = int_attr("y")(input)?;
    let (input, z) = int_attr("z")(input)?;
    let (input, half_dim) = int_attr("dim")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('>')(input)?;

    // A leaf holds line elements, a branch holds node elements;
    // the writer never mixes the two.
    let (input, lines) = many0(line_element)(input)?;
    let (input, nodes) = if lines.is_empty() {
        many0(node_element)(input)?
    } else {
        (input, Vec::new())
    };

    let (input, _) = multispace0(input)?;
    let (input, _) = tag("</node>")(input)?;

    let content = if nodes.is_empty() {
        RawContent::Lines(lines)
    } else {
        RawContent::Nodes(nodes)
    };
    Ok((
        input,
        RawNode {
            center: IVec3::new(x, y, z),
            half_dim,
            content,
        },
    ))
}

/// Inverse of the writer's escape table, including its reversed
/// `<`/`>` mapping. Anything other than a known entity or a single
/// character is an error.
fn unescape_label(raw: &str) -> Result<char> {
    match raw {
        "&quot;" => Ok('"'),
        "&apos;" => Ok('\''),
        "&lt;" => Ok('>'),
        "&gt;" => Ok('<'),
        "&amp;" => Ok('&'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(XmlError::InvalidLabel(raw.to_string())),
            }
        }
    }
}

fn build_node(raw: RawNode<'_>) -> Result<Node> {
    if raw.half_dim < 0 {
        return Err(XmlError::InvalidExtent(raw.half_dim));
    }
    let volume = Volume::new(raw.center, raw.half_dim);

    match raw.content {
        RawContent::Lines(lines) => {
            let records = lines
                .into_iter()
                .map(|(pos, length, label)| {
                    Ok(Line {
                        pos,
                        length,
                        label: unescape_label(label)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Node::leaf_with(volume, records))
        }
        RawContent::Nodes(nodes) => {
            if nodes.len() != 8 {
                return Err(XmlError::InvalidChildCount(nodes.len()));
            }
            let children = nodes
                .into_iter()
                .map(build_node)
                .collect::<Result<Vec<_>>>()?;
            let children: Box<[Node; 8]> = children
                .into_boxed_slice()
                .try_into()
                .expect("length checked above");
            Ok(Node::branch(volume, children))
        }
    }
}

/// Parse a dump back into an Octree.
///
/// The dump format does not record the capacity, so the caller supplies
/// it. Leaves larger than `capacity` are accepted as written; a valid
/// writer only produces them under the minimum-extent overflow policy.
///
/// # Panics
/// Panics if `capacity` is zero.
pub fn parse_xml(input: &str, capacity: usize) -> Result<Octree> {
    assert!(capacity >= 1, "node capacity must be at least 1");

    let (rest, raw) = node_element(input).map_err(|e| XmlError::ParseError(e.to_string()))?;
    if !rest.trim().is_empty() {
        return Err(XmlError::TrailingContent);
    }
    let root = build_node(raw)?;
    Ok(Octree::from_parts(root, capacity))
}
