//! Demo-mode content shown when the backend cannot answer.
//!
//! Both generators are pure and deterministic. The output is a labelled
//! simulation notice that echoes the user's input verbatim and lists the
//! integration steps; it never contains a diagnosis.

const RULE: &str = "========================================";

/// Simulated response for a diagnostic query.
pub fn query_fallback(query: &str) -> String {
    let mut out = String::new();
    out.push_str("DEMO MODE - AI DIAGNOSTIC SYSTEM\n\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(&format!("ASTRONAUT QUERY: \"{}\"\n\n", query));
    out.push_str("SYSTEM STATUS: Backend connection required\n\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str("INTEGRATION STEPS:\n\n");
    out.push_str("1. Set base_url in the client configuration to your backend URL\n");
    out.push_str("2. Ensure the backend is running (python app.py)\n");
    out.push_str("3. Expose POST /query accepting {\"query\": string}\n");
    out.push_str("4. The backend routes the query through llm_integration.py\n");
    out.push_str("5. Answers are retrieved from Chroma DB and returned as {\"answer\": string}\n\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str("This is a simulated response. No diagnostic analysis was performed.\n\n");
    out.push_str("Once connected, this system will provide:\n");
    out.push_str("- Real-time medical diagnostics\n");
    out.push_str("- Symptom analysis\n");
    out.push_str("- Treatment recommendations\n");
    out.push_str("- Medical research insights\n");
    out.push_str("- Emergency protocols\n\n");
    out.push_str("Mission Control Standing By...");
    out
}

/// Simulated response for a CSV upload.
pub fn upload_fallback(file_name: &str) -> String {
    let mut out = String::new();
    out.push_str("DEMO MODE - KNOWLEDGE BASE INGESTION\n\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(&format!("FILE: \"{}\"\n\n", file_name));
    out.push_str("SYSTEM STATUS: Simulated upload, nothing was stored\n\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str("INTEGRATION STEPS:\n\n");
    out.push_str("1. Expose POST /upload_csv accepting multipart/form-data with a \"file\" field\n");
    out.push_str("2. Process the CSV with ingest_papers.py\n");
    out.push_str("3. Store the embeddings under chroma_db_data/\n");
    out.push_str("4. Return {\"status\": \"success\", \"message\": \"...\"}");
    out
}
