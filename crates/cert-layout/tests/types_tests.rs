use cert_layout::*;

#[test]
fn test_paper_size_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::A3.dimensions_mm(), (297.0, 420.0));
    assert_eq!(PaperSize::A5.dimensions_mm(), (148.0, 210.0));
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));
    assert_eq!(PaperSize::Legal.dimensions_mm(), (215.9, 355.6));

    let custom = PaperSize::Custom {
        width_mm: 100.0,
        height_mm: 200.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 200.0));
}

#[test]
fn test_page_orientation() {
    let portrait = Page::new(PaperSize::A4, Orientation::Portrait);
    assert_eq!((portrait.width_mm, portrait.height_mm), (210.0, 297.0));

    let landscape = Page::new(PaperSize::A4, Orientation::Landscape);
    assert_eq!((landscape.width_mm, landscape.height_mm), (297.0, 210.0));
}

#[test]
fn test_page_clamp_origin() {
    let page = Page::new(PaperSize::A4, Orientation::Portrait);
    assert_eq!(page.max_origin(10.0), (200.0, 287.0));
    assert_eq!(page.clamp_origin(-5.0, 300.0, 10.0), (0.0, 287.0));
    assert_eq!(page.clamp_origin(250.0, -1.0, 10.0), (200.0, 0.0));
    assert_eq!(page.clamp_origin(42.5, 17.0, 10.0), (42.5, 17.0));

    // A page smaller than the margin collapses to the origin
    let tiny = Page::new(
        PaperSize::Custom {
            width_mm: 8.0,
            height_mm: 8.0,
        },
        Orientation::Portrait,
    );
    assert_eq!(tiny.clamp_origin(5.0, 5.0, 10.0), (0.0, 0.0));
}

#[test]
fn test_template_field_defaults() {
    let field = TemplateField::new(3, "student_name", 20.0, 30.0);
    assert_eq!(field.id, FieldId(3));
    assert_eq!(field.width, None);
    assert_eq!(field.font_name, "Helvetica");
    assert_eq!(field.align, TextAlign::Left);
    assert_eq!(field.direction, TextDirection::Ltr);
    assert!(field.visible);
    assert_eq!(field.display_name(), "student_name");

    let labelled = field.with_label("Student name").hidden();
    assert_eq!(labelled.display_name(), "Student name");
    assert!(!labelled.visible);
}

#[test]
fn test_background_alignment_clamped() {
    let alignment = BackgroundAlignment {
        offset_x: -4,
        offset_y: 7,
        scale: 200.0,
        scale_x: 10.0,
        scale_y: 120.0,
    }
    .clamped();

    assert_eq!(alignment.offset_x, -4);
    assert_eq!(alignment.offset_y, 7);
    assert_eq!(alignment.scale, 150.0);
    assert_eq!(alignment.scale_x, 50.0);
    assert_eq!(alignment.scale_y, 120.0);
}

#[test]
fn test_template_field_lookup() {
    let mut template = Template {
        fields: vec![
            TemplateField::new(1, "student_name", 20.0, 30.0),
            TemplateField::new(2, "issue_date", 20.0, 60.0),
        ],
        ..Default::default()
    };

    assert_eq!(template.field(FieldId(2)).map(|f| f.key.as_str()), Some("issue_date"));
    assert!(template.field(FieldId(9)).is_none());

    if let Some(field) = template.field_mut(FieldId(1)) {
        field.position_x = 25.0;
    }
    assert_eq!(template.fields[0].position_x, 25.0);
    assert_eq!(template.page(), Page::new(PaperSize::A4, Orientation::Portrait));
}

#[cfg(feature = "serde")]
#[test]
fn test_template_json_shape() {
    let json = r#"{
        "id": 4,
        "name": "Graduation",
        "paper_size": "a4",
        "orientation": "Landscape",
        "background": { "offset_x": 2, "scale_x": 90 },
        "fields": [
            { "id": 1, "key": "student_name", "position_x": 20, "position_y": 30 },
            { "id": 2, "key": "thesis_title", "position_x": 20, "position_y": 80,
              "width": 120, "align": "center", "direction": "rtl", "visible": false }
        ]
    }"#;

    let template: Template = serde_json::from_str(json).unwrap();
    assert_eq!(template.id, TemplateId(4));
    assert_eq!(template.paper_size, PaperSize::A4);
    assert_eq!(template.orientation, Orientation::Landscape);
    assert_eq!(template.background.offset_x, 2);
    assert_eq!(template.background.offset_y, 0);
    assert_eq!(template.background.scale_x, 90.0);
    assert_eq!(template.background.scale_y, 100.0);

    let title = &template.fields[1];
    assert_eq!(title.width, Some(120.0));
    assert_eq!(title.align, TextAlign::Center);
    assert_eq!(title.direction, TextDirection::Rtl);
    assert!(!title.visible);
    assert_eq!(template.fields[0].font_size, 14.0);
}

#[cfg(feature = "serde")]
#[test]
fn test_custom_paper_size_json() {
    let custom: PaperSize = serde_json::from_str(r#"{"width_mm": 250, "height_mm": 180}"#).unwrap();
    assert_eq!(
        custom,
        PaperSize::Custom {
            width_mm: 250.0,
            height_mm: 180.0
        }
    );

    assert!(serde_json::from_str::<PaperSize>(r#"{"width_mm": 0, "height_mm": 180}"#).is_err());
    assert!(serde_json::from_str::<PaperSize>(r#""B5""#).is_err());
}
