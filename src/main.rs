fn main() {
    if let Err(err) = relation_graph_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
