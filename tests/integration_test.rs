use figpress::{FigpressConfig, OutputFormat, run, run_pipeline};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn sample_file_response() -> Value {
    json!({
        "name": "Checkout",
        "lastModified": "2024-05-01T10:00:00Z",
        "document": {
            "id": "0:0",
            "type": "DOCUMENT",
            "name": "Document",
            "children": [{
                "id": "0:1",
                "type": "CANVAS",
                "name": "Page 1",
                "children": [
                    {
                        "id": "1:2",
                        "type": "FRAME",
                        "name": "Card",
                        "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1, "a": 1}}],
                        "cornerRadius": 12,
                        "layoutMode": "VERTICAL",
                        "itemSpacing": 16,
                        "children": [
                            {
                                "id": "1:3",
                                "type": "GROUP",
                                "name": "Title wrapper",
                                "children": [
                                    {"id": "1:4", "type": "TEXT", "name": "Title", "characters": "Order summary"}
                                ]
                            },
                            {"id": "1:5", "type": "TEXT", "name": "Draft note", "visible": false, "characters": "WIP"},
                            {
                                "id": "1:6",
                                "type": "INSTANCE",
                                "name": "Icon / Cart",
                                "children": [{"id": "1:7", "type": "VECTOR", "name": "path"}]
                            }
                        ]
                    },
                    {"id": "2:1", "type": "FRAME", "name": "Hidden frame", "visible": false}
                ]
            }]
        }
    })
}

#[test]
fn test_end_to_end_json() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let input = root.join("checkout.json");
    fs::write(&input, sample_file_response().to_string())?;

    let output_path = root.join("compact.json");
    let config = FigpressConfig {
        sources: vec![input.display().to_string()],
        output: Some(output_path.clone()),
        output_format: OutputFormat::Json,
        prompt: Some("Implement this card".to_string()),
        no_tokens: true,
        ..Default::default()
    };

    run(config)?;

    assert!(output_path.exists());
    let written: Value = serde_json::from_str(&fs::read_to_string(output_path)?)?;

    assert_eq!(written["prompt"], "Implement this card");
    assert_eq!(written["legend"]["c"], "children");

    // DOCUMENT flattens into its only page; the page keeps its record because
    // flattening counts raw children, hidden ones included.
    let tree = &written["documents"][0]["tree"];
    assert_eq!(
        tree,
        &json!({
            "t": "CANVAS",
            "n": "Page 1",
            "c": [{
                "t": "FR",
                "n": "Card",
                "lm": "V",
                "is": 16,
                "f": "#ffffff",
                "c": [
                    {"t": "TX", "n": "Title", "v": "Order summary"},
                    {"t": "IC", "n": "Cart"}
                ]
            }]
        })
    );

    let text = serde_json::to_string(tree)?;
    for raw_key in ["\"type\"", "\"name\"", "\"children\"", "\"characters\"", "\"fills\"", "\"layoutMode\""] {
        assert!(!text.contains(raw_key), "raw key {} leaked", raw_key);
    }
    Ok(())
}

#[test]
fn test_multiple_documents_keep_order() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let mut sources = Vec::new();
    for i in 0..6 {
        let path = root.join(format!("doc{}.json", i));
        let node = json!({"type": "TEXT", "name": format!("text {}", i), "characters": i.to_string()});
        fs::write(&path, node.to_string())?;
        sources.push(path.display().to_string());
    }

    let config = FigpressConfig {
        sources,
        output: Some(root.join("out.json")),
        no_tokens: true,
        legend: false,
        ..Default::default()
    };
    let summary = run_pipeline(&config, None)?;

    let names: Vec<_> = summary
        .documents
        .iter()
        .map(|d| d.tree.as_ref().map(|t| t.name().to_string()))
        .collect();
    let expected: Vec<_> = (0..6).map(|i| Some(format!("text {}", i))).collect();
    assert_eq!(names, expected);

    let written: Value = serde_json::from_str(&summary.rendered)?;
    assert!(written.get("legend").is_none());
    assert_eq!(written["documents"].as_array().map(Vec::len), Some(6));
    Ok(())
}

#[test]
fn test_nothing_visible_is_not_an_error() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("hidden.json");
    fs::write(&input, json!({"type": "FRAME", "name": "gone", "visible": false}).to_string())?;

    let output_path = temp_dir.path().join("out.txt");
    let config = FigpressConfig {
        sources: vec![input.display().to_string()],
        output: Some(output_path.clone()),
        output_format: OutputFormat::Tree,
        no_tokens: true,
        ..Default::default()
    };
    let summary = run_pipeline(&config, None)?;

    assert_eq!(summary.empty_documents(), 1);
    assert!(fs::read_to_string(output_path)?.contains("(nothing visible)"));
    Ok(())
}

#[test]
fn test_token_savings_reported() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("checkout.json");
    fs::write(&input, sample_file_response().to_string())?;

    let config = FigpressConfig {
        sources: vec![input.display().to_string()],
        output: Some(temp_dir.path().join("out.md")),
        output_format: OutputFormat::Markdown,
        ..Default::default()
    };
    let summary = run_pipeline(&config, None)?;

    let tokens = summary.tokens.expect("token counting enabled");
    assert!(tokens.compact < tokens.raw);
    assert!(summary.rendered.contains(&format!("Token count: {}", tokens.compact)));
    Ok(())
}

#[test]
fn test_css_format_reads_raw_paints() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("hero.json");
    let node = json!({
        "type": "FRAME",
        "name": "Hero",
        "fills": [
            {"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0, "a": 1}},
            {
                "type": "GRADIENT_LINEAR",
                "gradientHandlePositions": [{"x": 0, "y": 0.5}, {"x": 1, "y": 0.5}],
                "gradientStops": [{"color": {"r": 1, "g": 0, "b": 0, "a": 1}, "position": 0}]
            }
        ]
    });
    fs::write(&input, node.to_string())?;

    let config = FigpressConfig {
        sources: vec![input.display().to_string()],
        output: Some(temp_dir.path().join("hero.css")),
        output_format: OutputFormat::Css,
        no_tokens: true,
        ..Default::default()
    };
    let summary = run_pipeline(&config, None)?;

    assert!(summary.rendered.contains(".hero {"));
    assert!(summary.rendered.contains("background: rgba(0, 0, 0, 1);"));
    assert!(
        summary
            .rendered
            .contains("background-image: linear-gradient(90deg, rgba(255, 0, 0, 1) 0%);")
    );
    Ok(())
}

#[test]
fn test_link_without_token_is_rejected() {
    let config = FigpressConfig {
        sources: vec!["https://www.figma.com/design/abc123/Shop?node-id=1-2".to_string()],
        token: None,
        ..Default::default()
    };
    let err = run_pipeline(&config, None).unwrap_err();
    assert!(err.to_string().contains("token"));
}
