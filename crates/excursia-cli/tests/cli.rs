use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn excursia() -> Command {
    Command::cargo_bin("excursia").unwrap()
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn excursion_page() -> Value {
    json!({
        "url": "https://hostaotdykh.ru/ekskursii-sochi/roza-khutor-detail.html",
        "title": "Экскурсия на Розу Хутор",
        "content": {
            "headings": [{"level": "h1", "text": "Роза Хутор"}],
            "paragraphs": ["Цена 4000 руб", "Продолжительность: 8 часов"],
            "lists": [["Отправление из Сочи - 3000р.взр./ 2500р.дет.(7-14)"]]
        },
        "images": [
            {"url": "https://hostaotdykh.ru/images/virtuemart/product/roza.jpg", "alt": "Роза"},
            {"url": "https://hostaotdykh.ru/images/oldlogo.png", "alt": ""}
        ]
    })
}

fn corpus() -> Value {
    json!({
        "pages": [
            excursion_page(),
            {"url": "https://hostaotdykh.ru/uslugi/gid", "title": "Услуги гида"},
            {
                "url": "https://hostaotdykh.ru/kontakty",
                "title": "Контакты",
                "contacts": {"phones": ["+7 988 000-00-00"]}
            },
            {"url": "https://hostaotdykh.ru/blog", "title": "Новости"}
        ],
        "excursions": [],
        "services": [],
        "contacts": {},
        "images": [{"url": "https://hostaotdykh.ru/images/a.jpg"}],
        "metadata": {"source": "crawl"}
    })
}

#[test]
fn test_classify_page() {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("page.json");
    write_json(&page, &excursion_page());

    excursia()
        .arg("classify")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: excursion"));
}

#[test]
fn test_classify_json_output() {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("page.json");
    write_json(&page, &json!({"url": "https://hostaotdykh.ru/kontakty", "title": "Контакты"}));

    excursia()
        .args(["classify", "--format", "json"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"category\": \"contact_page\""));
}

#[test]
fn test_extract_page() {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("page.json");
    write_json(&page, &excursion_page());

    let output = excursia().arg("extract").arg(&page).output().unwrap();
    assert!(output.status.success());

    let item: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(item["price"], "Цена 4000 руб");
    assert_eq!(item["duration"], "Продолжительность: 8 часов");
    assert_eq!(item["pickup_points"][0]["location"], "Сочи");
    assert_eq!(item["pickup_points"][0]["child_age"], "7-14");
    assert_eq!(item["additional_costs"], Value::Null);
}

#[test]
fn test_extract_refuses_non_excursion() {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("page.json");
    write_json(&page, &json!({"url": "https://hostaotdykh.ru/blog", "title": "Новости"}));

    excursia()
        .arg("extract")
        .arg(&page)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    excursia().args(["extract", "--force"]).arg(&page).assert().success();
}

#[test]
fn test_missing_input() {
    excursia()
        .args(["reclassify", "/nonexistent/corpus.json", "-o", "/tmp/out.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_reclassify_corpus() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("corpus.json");
    let output = dir.path().join("out.json");
    let report = dir.path().join("report.json");
    write_json(&input, &corpus());

    excursia()
        .args(["reclassify", "--quiet"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Reclassified 4 pages"));

    let rebuilt: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(rebuilt["excursions"].as_array().unwrap().len(), 1);
    assert_eq!(rebuilt["services"].as_array().unwrap().len(), 1);
    assert_eq!(rebuilt["pages"].as_array().unwrap().len(), 2);
    assert_eq!(rebuilt["contacts"]["phones"][0], "+7 988 000-00-00");
    assert_eq!(rebuilt["metadata"]["source"], "crawl");

    let report: Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["bookable"], 1);
    assert_eq!(report["skipped"], json!([]));
}

#[test]
fn test_reclassify_survives_malformed_page() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("corpus.json");
    let output = dir.path().join("out.json");
    let mut corpus = corpus();
    corpus["pages"]
        .as_array_mut()
        .unwrap()
        .push(json!({"url": "https://hostaotdykh.ru/bad", "content": "bare string", "images": ["x.jpg"]}));
    write_json(&input, &corpus);

    excursia()
        .args(["reclassify", "--quiet"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Reclassified 5 pages"));

    let rebuilt: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(rebuilt["excursions"].as_array().unwrap().len(), 1);
    assert_eq!(rebuilt["pages"].as_array().unwrap().len(), 3);
}

#[test]
fn test_reclassify_twice_is_identical() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("corpus.json");
    write_json(&input, &corpus());

    let mut outputs = Vec::new();
    for name in ["first.json", "second.json"] {
        let output = dir.path().join(name);
        excursia()
            .args(["reclassify", "--quiet"])
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .assert()
            .success();
        outputs.push(fs::read(&output).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_batch_pages() {
    let dir = TempDir::new().unwrap();
    let pages = dir.path().join("pages");
    fs::create_dir(&pages).unwrap();
    write_json(&pages.join("a.json"), &excursion_page());
    write_json(
        &pages.join("b.json"),
        &json!([
            {"url": "https://hostaotdykh.ru/uslugi/transfer", "title": "Трансфер"},
            {"url": "https://hostaotdykh.ru/blog", "title": "Новости"}
        ]),
    );
    fs::write(pages.join("c.json"), "{ not json").unwrap();

    let output = dir.path().join("corpus.json");
    let summary = dir.path().join("summary.csv");
    let pattern = format!("{}/*.json", pages.display());

    excursia()
        .args(["batch", &pattern, "-o"])
        .arg(&output)
        .assert()
        .failure();

    excursia()
        .args(["batch", &pattern, "--continue-on-error", "-o"])
        .arg(&output)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed files"));

    let corpus: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(corpus["excursions"].as_array().unwrap().len(), 1);
    assert_eq!(corpus["services"].as_array().unwrap().len(), 1);
    assert_eq!(corpus["pages"].as_array().unwrap().len(), 1);

    let summary = fs::read_to_string(&summary).unwrap();
    assert!(summary.contains("a.json,success,1,excursion,"));
    assert!(summary.contains("b.json,success,2,service;page,"));
    assert!(summary.contains("c.json,error,0,,"));
}

#[test]
fn test_batch_no_matches() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.json", dir.path().display());

    excursia()
        .args(["batch", &pattern, "-o", "/tmp/unused.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_catalog_export() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("corpus.json");
    let reclassified = dir.path().join("reclassified.json");
    let catalog = dir.path().join("catalog.json");
    let summary = dir.path().join("summary.tsv");
    let urls = dir.path().join("urls.txt");
    write_json(&input, &corpus());

    excursia()
        .args(["reclassify", "--quiet"])
        .arg(&input)
        .arg("-o")
        .arg(&reclassified)
        .assert()
        .success();

    excursia()
        .arg("catalog")
        .arg(&reclassified)
        .arg("-o")
        .arg(&catalog)
        .arg("--summary")
        .arg(&summary)
        .arg("--urls")
        .arg(&urls)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 excursions"));

    let exported: Value = serde_json::from_str(&fs::read_to_string(&catalog).unwrap()).unwrap();
    let entry = &exported["excursions"][0];
    assert_eq!(exported["total"], 1);
    assert_eq!(entry["category"], "Сочи");
    assert_eq!(entry["image_count"], 1);
    assert_eq!(entry["images"][0]["is_main"], true);

    let summary = fs::read_to_string(&summary).unwrap();
    let lines: Vec<_> = summary.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("URL\t"));
    assert!(lines[1].ends_with("\t1\tСочи"));

    assert_eq!(
        fs::read_to_string(&urls).unwrap(),
        "https://hostaotdykh.ru/ekskursii-sochi/roza-khutor-detail.html\n"
    );
}

#[test]
fn test_stats_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("corpus.json");
    write_json(&input, &corpus());

    let output = excursia()
        .args(["stats", "--format", "json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["corpus"]["pages"], 4);
    assert_eq!(stats["corpus"]["images"], 1);
    assert_eq!(stats["catalog"]["total"], 0);
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    excursia()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.max_buffer_chars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000000"));

    excursia()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.max_buffer_chars", "20"])
        .assert()
        .success();

    excursia()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.max_buffer_chars"])
        .assert()
        .success()
        .stdout(predicate::str::diff("20\n"));

    excursia()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.no_such_key", "1"])
        .assert()
        .failure();
}

#[test]
fn test_config_limits_buffer() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let input = dir.path().join("corpus.json");
    let output = dir.path().join("out.json");
    write_json(&config, &json!({"extraction": {"max_buffer_chars": 5}}));
    write_json(&input, &corpus());

    excursia()
        .arg("--config")
        .arg(&config)
        .args(["reclassify", "--quiet"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped pages"));

    let rebuilt: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(rebuilt["excursions"], json!([]));
}
