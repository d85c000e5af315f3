/// End-to-end tests for client generation
/// Each test drives the full pipeline: load, transform, render and emit

#[cfg(test)]
mod tests {
    use openapi_ts_gen::application::ApplicationError;
    use openapi_ts_gen::config::GeneratorConfig;
    use openapi_ts_gen::generation::{GenerationError, OutputLanguage};
    use openapi_ts_gen::infrastructure::typescript::exported_values;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn fixture() -> String {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/petstore.json")
            .display()
            .to_string()
    }

    fn config(source_url: String, language: OutputLanguage, output_dir: PathBuf) -> GeneratorConfig {
        GeneratorConfig {
            source_url,
            output_language: language,
            output_dir,
            template_dir: None,
        }
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_generate_typescript_client() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("client");

        let response = openapi_ts_gen::run(&config(fixture(), OutputLanguage::Ts, out.clone()))
            .await
            .unwrap();

        assert_eq!(response.models, 4);
        assert_eq!(response.operations, 6);
        assert_eq!(listing(&out), vec!["api.ts", "client.ts"]);

        let api = fs::read_to_string(out.join("api.ts")).unwrap();
        // Models keep declaration order and carry the suffix
        let pet = api.find("export interface PetModel {").unwrap();
        let new_pet = api.find("export type NewPetModel = PetModel & {").unwrap();
        let category = api.find("export interface CategoryModel {").unwrap();
        let pet_id = api.find("export type PetIdModel = number").unwrap();
        assert!(pet < new_pet && new_pet < category && category < pet_id);

        // Bracketed query names collapse into structured parameters
        assert!(api.contains("query: {"));
        assert!(api.contains("tags?: Array<string>"));
        assert!(api.contains("filter: Array<{"));
        assert!(!api.contains("tags[]"));

        // Path templates interpolate and keep no literal braces
        assert!(api.contains("url: `/pets/${params.path.petId}/photo`,"));
        assert!(!api.contains("{petId}"));

        // Multipart wins over JSON
        assert!(api.contains("'Content-Type': 'multipart/form-data',"));

        // Header names that are not identifiers are quoted
        assert!(api.contains("'X-Request-Id': string"));

        assert!(api.contains(
            "export function listPets(params: ListPetsParams, config?: RequestConfig): Promise<RequestResponse<ListPetsResponse>> {"
        ));
        assert!(api.contains("export function petsPetIdDelete("));
        assert!(api.contains(" * @deprecated\n"));
        assert!(api.contains("export type PetsPetIdDeleteResponse = any\n"));
        assert!(api.contains("export type ListPetsResponse = Array<PetModel>\n"));

        let client = fs::read_to_string(out.join("client.ts")).unwrap();
        assert!(client.contains("const client: Client = new Client()"));
    }

    #[tokio::test]
    async fn test_regeneration_is_idempotent_and_keeps_wrapper() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_path_buf();
        let config = config(fixture(), OutputLanguage::Ts, out.clone());

        openapi_ts_gen::run(&config).await.unwrap();
        let first = fs::read(out.join("api.ts")).unwrap();

        fs::write(out.join("client.ts"), "// customised transport\n").unwrap();

        let response = openapi_ts_gen::run(&config).await.unwrap();
        let second = fs::read(out.join("api.ts")).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            fs::read_to_string(out.join("client.ts")).unwrap(),
            "// customised transport\n"
        );
        assert_eq!(response.skipped, vec![out.join("client.ts")]);
        assert_eq!(response.written, vec![out.join("api.ts")]);
    }

    #[tokio::test]
    async fn test_generate_javascript_client() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_path_buf();

        let response = openapi_ts_gen::run(&config(fixture(), OutputLanguage::Js, out.clone()))
            .await
            .unwrap();

        assert_eq!(
            listing(&out),
            vec!["api.d.ts", "api.js", "client.d.ts", "client.js"]
        );
        assert_eq!(response.removed, vec![out.join("api.ts"), out.join("client.ts")]);

        for module in ["api", "client"] {
            let javascript = fs::read_to_string(out.join(format!("{module}.js"))).unwrap();
            let declarations = fs::read_to_string(out.join(format!("{module}.d.ts"))).unwrap();

            assert!(!javascript.contains("import type"));
            assert!(!javascript.contains("interface "));
            assert_eq!(
                exported_values(&declarations).unwrap(),
                exported_values(&javascript).unwrap(),
                "{module}.d.ts must declare exactly what {module}.js exports"
            );
        }

        let api_js = fs::read_to_string(out.join("api.js")).unwrap();
        assert!(api_js.contains("export function getPet(params, config) {"));
        assert!(api_js.contains("url: `/pets/${params.path.petId}`,"));

        let api_exports = exported_values(&api_js).unwrap();
        assert_eq!(
            api_exports.into_iter().collect::<Vec<_>>(),
            vec![
                "categoriesCategoryIdTreeGet",
                "createPet",
                "getPet",
                "listPets",
                "petsPetIdDelete",
                "uploadPhoto",
            ]
        );

        let api_dts = fs::read_to_string(out.join("api.d.ts")).unwrap();
        assert!(api_dts.contains("export interface CategoryModel {"));
        assert!(api_dts.contains(
            "export declare function getPet(params: GetPetParams, config?: RequestConfig): Promise<RequestResponse<GetPetResponse>>;"
        ));
    }

    #[tokio::test]
    async fn test_javascript_regeneration_keeps_wrapper() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_path_buf();
        let config = config(fixture(), OutputLanguage::Js, out.clone());

        openapi_ts_gen::run(&config).await.unwrap();
        fs::write(out.join("client.js"), "export default {};\n").unwrap();

        let response = openapi_ts_gen::run(&config).await.unwrap();

        assert_eq!(
            fs::read_to_string(out.join("client.js")).unwrap(),
            "export default {};\n"
        );
        assert_eq!(response.skipped, vec![out.join("client.js")]);
        assert!(!out.join("api.ts").exists());
    }

    #[tokio::test]
    async fn test_cyclic_schema_renders_by_name() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_path_buf();

        openapi_ts_gen::run(&config(fixture(), OutputLanguage::Ts, out.clone()))
            .await
            .unwrap();

        let api = fs::read_to_string(out.join("api.ts")).unwrap();
        assert!(api.contains("    parent?: CategoryModel\n"));
        assert!(api.contains("    children?: Array<CategoryModel>\n"));
        assert!(api.contains("export type CategoriesCategoryIdTreeGetResponse = CategoryModel\n"));
    }

    #[tokio::test]
    async fn test_generate_from_http_source() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/openapi.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(fs::read_to_string(fixture()).unwrap())
                    .insert_header("content-type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let url = format!("{}/openapi.json", mock_server.uri());
        let response = openapi_ts_gen::run(&config(url, OutputLanguage::Ts, temp.path().to_path_buf()))
            .await
            .unwrap();

        assert_eq!(response.operations, 6);
        assert!(temp.path().join("api.ts").exists());
    }

    #[tokio::test]
    async fn test_missing_success_response_aborts_before_writing() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("broken.json");
        fs::write(
            &source,
            r#"{
                "openapi": "3.0.0",
                "info": { "title": "Broken", "version": "1" },
                "paths": {
                    "/items": { "get": { "responses": { "404": { "description": "missing" } } } }
                }
            }"#,
        )
        .unwrap();
        let out = temp.path().join("out");

        let err = openapi_ts_gen::run(&config(
            source.display().to_string(),
            OutputLanguage::Ts,
            out.clone(),
        ))
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::GenerationError(GenerationError::DocumentShape { ref path, .. })
                if path == "/items"
        ));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_custom_template_directory() {
        let temp = TempDir::new().unwrap();
        let templates = temp.path().join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(
            templates.join("api.ts.tera"),
            "{% for op in operations %}export const {{ op.name }} = '{{ op.method }}'\n{% endfor %}",
        )
        .unwrap();
        let out = temp.path().join("out");

        let mut config = config(fixture(), OutputLanguage::Ts, out.clone());
        config.template_dir = Some(templates);
        openapi_ts_gen::run(&config).await.unwrap();

        let api = fs::read_to_string(out.join("api.ts")).unwrap();
        assert!(api.starts_with("export const listPets = 'get'\nexport const createPet = 'post'\n"));
        // The wrapper falls back to the built-in copy
        assert!(fs::read_to_string(out.join("client.ts"))
            .unwrap()
            .contains("export class Client"));
    }
}
