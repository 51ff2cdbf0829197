//! Shared fixtures: ruled-table PDFs built with lopdf.
//!
//! Each page gets one bordered table. Rows are 20pt tall and columns 90pt
//! wide, starting near the top-left of a US Letter page, so up to six
//! columns fit across.

#![allow(dead_code)]

use lopdf::{dictionary, Document, Object, Stream};
use std::io::Write;

const X0: f64 = 36.0;
const Y_TOP: f64 = 740.0;
const COL_W: f64 = 90.0;
const ROW_H: f64 = 20.0;

fn table_content_stream(rows: &[Vec<&str>]) -> Vec<u8> {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let x1 = X0 + COL_W * cols as f64;
    let y_bottom = Y_TOP - ROW_H * rows.len() as f64;

    let mut cs = String::from("1 w\n");
    for r in 0..=rows.len() {
        let y = Y_TOP - ROW_H * r as f64;
        cs.push_str(&format!("{X0} {y} m {x1} {y} l S\n"));
    }
    for c in 0..=cols {
        let x = X0 + COL_W * c as f64;
        cs.push_str(&format!("{x} {Y_TOP} m {x} {y_bottom} l S\n"));
    }

    for (r, row) in rows.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let tx = X0 + COL_W * c as f64 + 4.0;
            let ty = Y_TOP - ROW_H * r as f64 - 14.0;
            cs.push_str(&format!("BT /F1 8 Tf {tx} {ty} Td ({text}) Tj ET\n"));
        }
    }
    cs.into_bytes()
}

/// A PDF with one page per table.
pub fn table_pdf(pages: &[Vec<Vec<&str>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for rows in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, table_content_stream(rows)));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => font_id,
                },
            },
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// Faculty timetable over two pages; the second page continues the table
/// without repeating the header.
pub fn faculty_pdf() -> Vec<u8> {
    table_pdf(&[
        vec![
            vec!["Code", "Title", "Day", "Time", "Hall", "Lecturer"],
            vec!["CS101", "Intro to CS", "Mon", "7-9", "Hall A", "Dr. X"],
            vec!["CS102", "Data Structures", "Tue", "9-11", "LT2", "Dr. Y"],
            vec!["MTH101", "Calculus", "Mon", "7-9", "LT1", "Dr. Z"],
        ],
        vec![
            vec!["PHY101", "Mechanics", "Wednesday", "11:00-13:00", "Lab 3", "Dr. W"],
            vec!["CS103", "Logic", "Sun", "7-9", "LT4", "Dr. V"],
            vec!["CS104", "Networks", "Fri", "17-19", "LT5", "Dr. U"],
        ],
    ])
}

/// Form B registering CS101, CS102, PHY101 and CS103 (Sunday, off-grid).
pub fn form_b_pdf() -> Vec<u8> {
    table_pdf(&[vec![
        vec!["Course", "Course Title", "Status"],
        vec!["CS101", "Intro to CS", "Registered"],
        vec!["CS102", "Data Structures", "Registered"],
        vec!["PHY101", "Mechanics", "Registered"],
        vec!["CS103", "Logic", "Registered"],
    ]])
}

/// Write `bytes` to a temp file with the given suffix.
pub fn write_temp(bytes: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    f.write_all(bytes).expect("write temp file");
    f.flush().expect("flush temp file");
    f
}
