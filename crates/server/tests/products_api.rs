mod support;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use support::{body_json, empty_request, json_request, login, send, spawn_app};

fn mouse() -> serde_json::Value {
    json!({
        "name": "Mouse",
        "price": 25,
        "rating": 4.7,
        "specifications": {"Type": "Wireless"}
    })
}

#[tokio::test]
async fn product_crud_flow() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let token = login(&app).await?;
    let t = Some(token.as_str());

    // empty catalog
    let resp = send(&app, empty_request("GET", "/api/products", t)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, json!([]));

    // create
    let resp = send(&app, json_request("POST", "/api/products", t, &mouse())?).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers().get("location").and_then(|v| v.to_str().ok()), Some("/api/products/1"));
    let created = body_json(resp).await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Mouse");
    assert_eq!(created["specifications"]["Type"], "Wireless");

    // list + get
    let resp = send(&app, empty_request("GET", "/api/products", t)?).await?;
    let list = body_json(resp).await?;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    let resp = send(&app, empty_request("GET", "/api/products/1", t)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, created);

    // update
    let mut changed = mouse();
    changed["id"] = json!(1);
    changed["name"] = json!("Trackball");
    changed["imageUrl"] = json!("https://img.example.com/tb.png");
    let resp = send(&app, json_request("PUT", "/api/products/1", t, &changed)?).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&app, empty_request("GET", "/api/products/1", t)?).await?;
    let fetched = body_json(resp).await?;
    assert_eq!(fetched["name"], "Trackball");
    assert_eq!(fetched["imageUrl"], "https://img.example.com/tb.png");

    // delete
    let resp = send(&app, empty_request("DELETE", "/api/products/1", t)?).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&app, empty_request("GET", "/api/products/1", t)?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = send(&app, empty_request("GET", "/api/products", t)?).await?;
    assert_eq!(body_json(resp).await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn created_products_are_written_to_disk() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let token = login(&app).await?;
    let resp = send(&app, json_request("POST", "/api/products", Some(&token), &mouse())?).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let raw = tokio::fs::read_to_string(&app.products_path).await?;
    let on_disk: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(on_disk[0]["id"], 1);
    assert_eq!(on_disk[0]["name"], "Mouse");
    assert!(raw.contains('\n'), "snapshot should be pretty-printed");
    Ok(())
}

#[tokio::test]
async fn invalid_payload_returns_violations() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let token = login(&app).await?;
    let bad = json!({"name": "", "price": 0, "rating": 6, "description": "d".repeat(501)});
    let resp = send(&app, json_request("POST", "/api/products", Some(&token), &bad)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation Error");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .map(|v| v.iter().filter_map(|x| x["field"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(fields, vec!["description", "name", "price", "rating", "specifications"]);

    // nothing was stored
    let resp = send(&app, empty_request("GET", "/api/products", Some(&token))?).await?;
    assert_eq!(body_json(resp).await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn update_and_delete_of_missing_product_are_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let token = login(&app).await?;
    let t = Some(token.as_str());

    let resp = send(&app, json_request("PUT", "/api/products/9", t, &mouse())?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = send(&app, empty_request("DELETE", "/api/products/9", t)?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_with_mismatched_body_id_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let token = login(&app).await?;
    let t = Some(token.as_str());
    send(&app, json_request("POST", "/api/products", t, &mouse())?).await?;

    let mut body = mouse();
    body["id"] = json!(2);
    let resp = send(&app, json_request("PUT", "/api/products/1", t, &body)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, empty_request("GET", "/api/products/1", t)?).await?;
    assert_eq!(body_json(resp).await?["name"], "Mouse");
    Ok(())
}

#[tokio::test]
async fn ids_continue_after_the_highest_existing_id() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    if let Some(dir) = app.products_path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(
        &app.products_path,
        serde_json::to_vec_pretty(&json!([
            {"Id": 1, "Name": "Old A", "Price": 10, "Rating": 3, "Specifications": {}},
            {"Id": 3, "Name": "Old B", "Price": 12.5, "Rating": 4, "Specifications": {}}
        ]))?,
    )
    .await?;

    let token = login(&app).await?;
    let resp = send(&app, json_request("POST", "/api/products", Some(&token), &mouse())?).await?;
    assert_eq!(body_json(resp).await?["id"], 4);
    Ok(())
}

#[tokio::test]
async fn corrupt_store_is_an_internal_error() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    if let Some(dir) = app.products_path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(&app.products_path, b"[{ broken").await?;

    let token = login(&app).await?;
    let resp = send(&app, empty_request("GET", "/api/products", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn null_name_is_a_violation_not_a_decode_error() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let token = login(&app).await?;
    let mut body = mouse();
    body["name"] = json!(null);
    let resp = send(&app, json_request("POST", "/api/products", Some(&token), &body)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await?;
    assert_eq!(body["message"], "Validation Error");
    assert_eq!(body["error"]["details"][0]["field"], "name");
    Ok(())
}

#[tokio::test]
async fn malformed_requests_use_the_error_envelope() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let token = login(&app).await?;
    let auth = format!("Bearer {token}");

    // broken JSON
    let req = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("authorization", &auth)
        .header("content-type", "application/json")
        .body(Body::from("{ \"name\": "))?;
    let resp = send(&app, req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await?["success"], false);

    // wrong field type
    let mut wrong = mouse();
    wrong["price"] = json!("cheap");
    let resp = send(&app, json_request("POST", "/api/products", Some(&token), &wrong)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await?["success"], false);

    // no content type
    let req = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("authorization", &auth)
        .body(Body::from(serde_json::to_vec(&mouse())?))?;
    let resp = send(&app, req).await?;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_json(resp).await?["success"], false);

    // non-numeric id
    let resp = send(&app, empty_request("GET", "/api/products/abc", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Bad Request");
    Ok(())
}
