use scribe_core::config::ModelConfig;

pub fn show() {
    let models = ModelConfig::default();
    println!("vision     {}", models.vision);
    println!("reasoning  {}", models.reasoning);
    println!("fast       {}", models.fast);
    println!("speech     {}", models.speech);
}
