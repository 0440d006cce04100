//! Resource-name helpers for reference values
//!
//! References travel as full resource names:
//! `projects/{project}/databases/{database}/documents/{collection}/{doc}...`
//!
//! Ordering is segment-by-segment (so the database id orders before the
//! document path, and `c1/doc1 < c10/doc1 < c2/doc1` holds even though a
//! whole-string comparison of some name pairs would disagree). The index
//! encoder nests each document-path segment into the byte stream separately
//! so that prefix relationships between paths survive the encoding.

use std::cmp::Ordering;

use crate::bytes::compare_utf8;

/// Number of segments in the database prefix
/// (`projects/{p}/databases/{d}/documents`).
pub const DATABASE_PREFIX_SEGMENTS: usize = 5;

/// Compare two resource names segment-by-segment, shorter-is-less.
pub fn compare_resource_names(a: &str, b: &str) -> Ordering {
    let mut left = a.split('/');
    let mut right = b.split('/');
    loop {
        match (left.next(), right.next()) {
            (Some(l), Some(r)) => {
                let ord = compare_utf8(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
        }
    }
}

/// The document-path segments of a resource name: non-empty segments after
/// the database prefix.
///
/// A name shorter than the prefix yields no segments.
pub fn document_path_segments(name: &str) -> impl Iterator<Item = &str> {
    name.split('/')
        .filter(|segment| !segment.is_empty())
        .skip(DATABASE_PREFIX_SEGMENTS)
}
