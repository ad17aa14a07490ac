use pdf_unbooklet::*;

#[test]
fn test_paper_size_dimensions() {
    let a4 = PaperSize::A4;
    assert_eq!(a4.dimensions_mm(), (210.0, 297.0));

    let a5 = PaperSize::A5;
    assert_eq!(a5.dimensions_mm(), (148.0, 210.0));

    let custom = PaperSize::Custom {
        width_mm: 100.0,
        height_mm: 200.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 200.0));
}

#[test]
fn test_paper_size_orientation() {
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );

    let (w, h) = PaperSize::A4.dimensions_pt(Orientation::Portrait);
    assert!((w - 595.28).abs() < 0.01);
    assert!((h - 841.89).abs() < 0.01);
}

#[test]
fn test_rotation_degrees() {
    assert_eq!(Rotation::None.degrees(), 0);
    assert_eq!(Rotation::Clockwise90.degrees(), 90);
    assert_eq!(Rotation::Clockwise180.degrees(), 180);
    assert_eq!(Rotation::Clockwise270.degrees(), 270);
}

#[test]
fn test_rotation_from_degrees() {
    assert_eq!(Rotation::from_degrees(0), Some(Rotation::None));
    assert_eq!(Rotation::from_degrees(450), Some(Rotation::Clockwise90));
    assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Clockwise270));
    assert_eq!(Rotation::from_degrees(-180), Some(Rotation::Clockwise180));
    assert_eq!(Rotation::from_degrees(45), None);
}

#[test]
fn test_rotation_symbol() {
    assert_eq!(Rotation::None.symbol(), "^   0");
    assert_eq!(Rotation::Clockwise90.symbol(), ">  90");
    assert_eq!(Rotation::Clockwise180.symbol(), "v 180");
    assert_eq!(Rotation::Clockwise270.symbol(), "< 270");
}

#[test]
fn test_sheet_failed_is_not_nested() {
    let error = UnbookletError::NoPages
        .at_sheet(3, Stage::Split)
        .at_sheet(4, Stage::Render);
    match error {
        UnbookletError::SheetFailed { index, stage, .. } => {
            assert_eq!(index, 3);
            assert_eq!(stage, Stage::Split);
        }
        other => panic!("Expected SheetFailed error, got {:?}", other),
    }
}

#[test]
fn test_sheet_failed_message() {
    let error = UnbookletError::Geometry {
        sheet: 2,
        reason: "missing or malformed MediaBox".to_string(),
    }
    .at_sheet(2, Stage::Read);
    assert_eq!(
        error.to_string(),
        "Sheet 2 failed during read: Sheet 2: missing or malformed MediaBox"
    );
}

#[test]
fn test_page_failed_takes_over_sheet_context() {
    let error = UnbookletError::NoPages
        .at_sheet(3, Stage::Read)
        .at_page(0, Stage::Render);
    match error {
        UnbookletError::PageFailed { index, stage, .. } => {
            assert_eq!(index, 3);
            assert_eq!(stage, Stage::Read);
        }
        other => panic!("Expected PageFailed error, got {:?}", other),
    }
}
