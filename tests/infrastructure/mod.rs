mod bundle_cache_test;
mod openai_engine_test;
