use cert_layout::*;
use cert_print::*;

fn graduation() -> Template {
    Template {
        id: TemplateId(3),
        name: "Graduation".to_string(),
        fields: vec![
            TemplateField::new(1, "student_name", 20.0, 30.0),
            TemplateField::new(2, "issue_date", 20.0, 60.0),
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_load_records_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.csv");
    tokio::fs::write(
        &path,
        "student_name, issue_date\nLayla Haddad, 2024-03-05\nOmar Nasser,2024-06-30\n",
    )
    .await
    .unwrap();

    let records = load_records_from_csv(&path).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("student_name"), Some("Layla Haddad"));
    assert_eq!(records[0].get("issue_date"), Some("2024-03-05"));
    assert_eq!(records[1].get("issue_date"), Some("2024-06-30"));
}

#[tokio::test]
async fn test_missing_csv_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_records_from_csv(dir.path().join("missing.csv")).await;
    assert!(matches!(result, Err(PrintError::Io(_))));
}

#[test]
fn test_layout_certificate_resolves_values() {
    let ctx = EditorContext::new(graduation(), EditorOptions::default()).unwrap();
    let resolver =
        ClassifiedResolver::new().classify("issue_date", FieldClass::Date(DateStyle::Long));
    let record = DataRecord::new()
        .with("student_name", "Layla Haddad")
        .with("issue_date", "2024-03-05");

    let placements = layout_certificate(&ctx.print_job(), &record, &resolver);
    let texts: Vec<_> = placements.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["Layla Haddad", "5 March 2024"]);

    // Empty values are not drawn
    let partial = DataRecord::new().with("student_name", "Omar Nasser");
    assert_eq!(layout_certificate(&ctx.print_job(), &partial, &resolver).len(), 1);
}

#[tokio::test]
async fn test_editor_prints_through_pdf_printer() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonTemplateStore::new(dir.path());
    store.write(&graduation()).await.unwrap();

    let mut ctx = EditorContext::open(&store, TemplateId(3), EditorOptions::default())
        .await
        .unwrap();
    assert!(ctx.begin_drag(FieldId(1), PointerPos::new(0.0, 0.0)));
    ctx.pointer_move(PointerPos::new(20.0, 0.0));
    ctx.pointer_up();

    let output = dir.path().join("graduation.pdf");
    let printer = PdfPrinter::new(&output, ClassifiedResolver::new())
        .with_records(vec![DataRecord::new().with("student_name", "Layla Haddad")]);
    ctx.print(&store, &store, &printer).await.unwrap();

    // Auto-saved before printing
    let saved = store.read(TemplateId(3)).await.unwrap();
    assert_eq!(saved.field(FieldId(1)).unwrap().position_x, 30.0);

    let bytes = tokio::fs::read(&output).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_print_errors_map_to_layout_errors() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = EditorContext::new(graduation(), EditorOptions::default()).unwrap();
    let output = dir.path().join("missing/dir/out.pdf");
    let printer = PdfPrinter::new(output, ClassifiedResolver::new());

    let result = printer.print(&ctx.print_job()).await;
    assert!(matches!(result, Err(LayoutError::Print(_))));
}
