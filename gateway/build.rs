fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Central proto repo is at ../proto/ relative to gateway/
    let proto_root = "../proto";
    let trace_proto = format!("{proto_root}/jalki/v1/trace.proto");

    // Tell Cargo to rerun if the proto file changes
    println!("cargo:rerun-if-changed={trace_proto}");

    // The generated stubs are checked in under src/proto/; regeneration is
    // opt-in so plain builds never need protoc.
    if std::env::var_os("JALKI_REGEN_PROTO").is_none() {
        return Ok(());
    }

    if !std::path::Path::new(&trace_proto).exists() {
        println!("cargo:warning=Proto source not found, using pre-generated file");
        return Ok(());
    }

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .out_dir("src/proto")
        .compile_protos(&[&trace_proto], &[proto_root])?;

    Ok(())
}
