//! Integration tests for file and directory conversion through the library

#[cfg(test)]
mod file_conversion_tests {
    use std::fs;
    use tempfile::tempdir;
    use xmljsonconv::conversion::batch::convert_directory;
    use xmljsonconv::{ConversionConfig, ConversionEngine, Direction, InputSource};

    #[test]
    fn test_file_direction_follows_extension() {
        let dir = tempdir().unwrap();
        let xml_path = dir.path().join("doc.xml");
        fs::write(&xml_path, "<doc><title>Hello</title></doc>").unwrap();

        let engine = ConversionEngine::new(ConversionConfig::default());
        let output = engine
            .convert_source(&InputSource::File(xml_path), None)
            .unwrap();

        assert_eq!(output.metadata.direction, Direction::XmlToJson);
        assert!(output.content.contains("\"title\""));

        let json_path = dir.path().join("doc.json");
        fs::write(&json_path, &output.content).unwrap();
        let back = engine
            .convert_source(&InputSource::File(json_path), None)
            .unwrap();
        assert_eq!(back.metadata.direction, Direction::JsonToXml);
        assert_eq!(back.content, "<doc>\n\t<title>Hello</title>\n</doc>");
    }

    #[test]
    fn test_unknown_extension_sniffs_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("payload.txt");
        fs::write(&path, "  <root/>").unwrap();

        let engine = ConversionEngine::new(ConversionConfig::default());
        let output = engine.convert_source(&InputSource::File(path), None).unwrap();
        assert_eq!(output.metadata.direction, Direction::XmlToJson);
    }

    #[test]
    fn test_forced_direction_overrides_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mislabelled.json");
        fs::write(&path, "<root/>").unwrap();

        let engine = ConversionEngine::new(ConversionConfig::default());
        assert!(engine
            .convert_source(&InputSource::File(path.clone()), None)
            .is_err());
        assert!(engine
            .convert_source(&InputSource::File(path), Some(Direction::XmlToJson))
            .is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let engine = ConversionEngine::new(ConversionConfig::default());
        let err = engine
            .convert_source(&InputSource::File(dir.path().join("nope.xml")), None)
            .unwrap_err();
        assert!(err.user_message().contains("nope.xml"));
    }

    #[test]
    fn test_directory_conversion_creates_output_files() {
        let input_dir = tempdir().unwrap();
        let nested = input_dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(input_dir.path().join("a.xml"), "<a><name>Alice</name></a>").unwrap();
        fs::write(nested.join("b.xml"), "<b><name>Bob</name></b>").unwrap();
        fs::write(input_dir.path().join("ignored.txt"), "nothing").unwrap();

        let output_dir = tempdir().unwrap();
        let report = convert_directory(
            input_dir.path(),
            output_dir.path(),
            true,
            None,
            &ConversionConfig::default(),
            false,
        )
        .unwrap();

        assert_eq!(report.converted.len(), 2);
        let a = fs::read_to_string(output_dir.path().join("a.json")).unwrap();
        assert!(a.contains("Alice"));
        let b = fs::read_to_string(output_dir.path().join("sub/b.json")).unwrap();
        assert!(b.contains("Bob"));
        assert!(!output_dir.path().join("ignored.json").exists());
    }
}
