use clap::{Parser, ValueEnum};
use serde_json::{json, Map, Value};

#[derive(Clone, Copy, ValueEnum)]
enum Transport {
    /// Query text in the URL (`?query=...`)
    Get,
    /// Query text in a JSON body (`{"query": "..."}`)
    Post,
}

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Send a GraphQL query to a running gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080/graphql")]
    url: String,

    #[arg(short, long, value_enum, default_value = "post")]
    transport: Transport,

    /// Variables as a JSON object
    #[arg(long)]
    variables: Option<String>,

    #[arg(long)]
    operation_name: Option<String>,

    /// Query text, e.g. '{ getData(id: "42") { id name } }'
    query: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let variables: Map<String, Value> = match &cli.variables {
        Some(raw) => serde_json::from_str(raw)?,
        None => Map::new(),
    };

    let res = match cli.transport {
        Transport::Get => {
            let mut params = vec![("query", cli.query.clone())];
            if !variables.is_empty() {
                params.push(("variables", Value::Object(variables).to_string()));
            }
            if let Some(name) = &cli.operation_name {
                params.push(("operationName", name.clone()));
            }
            client.get(&cli.url).query(&params).send().await?
        }
        Transport::Post => {
            let body = json!({
                "query": cli.query,
                "operationName": cli.operation_name,
                "variables": variables,
            });
            client.post(&cli.url).json(&body).send().await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
