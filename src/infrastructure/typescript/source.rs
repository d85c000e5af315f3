//! Parsing, lowering and printing of TypeScript modules through swc

use std::collections::BTreeSet;

use swc_common::comments::{Comments, SingleThreadedComments};
use swc_common::sync::Lrc;
use swc_common::{BytePos, FileName, GLOBALS, Globals, Mark, SourceMap, Spanned};
use swc_ecma_ast::{
    Decl, DefaultDecl, EsVersion, ExportSpecifier, Module, ModuleDecl, ModuleExportName,
    ModuleItem, Pass, Pat, Program,
};
use swc_ecma_codegen::to_code_default;
use swc_ecma_parser::error::Error as ParseError;
use swc_ecma_parser::{Syntax, TsSyntax, parse_file_as_module};
use swc_ecma_transforms_base::resolver;
use swc_ecma_transforms_typescript::strip;
use swc_typescript::fast_dts::{FastDts, FastDtsOptions};

use super::TranspileError;

/// A parsed module together with the source map and comments it was read with
struct SourceModule {
    cm: Lrc<SourceMap>,
    comments: SingleThreadedComments,
    file_name: Lrc<FileName>,
    module: Module,
}

impl SourceModule {
    /// Must run inside `GLOBALS.set`
    fn parse(file_name: &str, source: &str) -> Result<Self, TranspileError> {
        let cm: Lrc<SourceMap> = Default::default();
        let file_name = Lrc::new(FileName::Custom(file_name.to_string()));
        let fm = cm.new_source_file(file_name.clone(), source.to_string());
        let comments = SingleThreadedComments::default();

        let mut recovered = Vec::new();
        let module = parse_file_as_module(
            &fm,
            Syntax::Typescript(TsSyntax::default()),
            EsVersion::EsNext,
            Some(&comments),
            &mut recovered,
        )
        .map_err(|e| syntax_error(fm.start_pos, e))?;

        // Recoverable errors still mean the input is not valid TypeScript
        if let Some(error) = recovered.into_iter().next() {
            return Err(syntax_error(fm.start_pos, error));
        }

        Ok(Self {
            cm,
            comments,
            file_name,
            module,
        })
    }

    fn print(&self, program: &Program) -> String {
        let comments = Some(&self.comments as &dyn Comments);
        match program {
            Program::Module(module) => to_code_default(self.cm.clone(), comments, module),
            Program::Script(script) => to_code_default(self.cm.clone(), comments, script),
        }
    }
}

fn syntax_error(start: BytePos, error: ParseError) -> TranspileError {
    TranspileError::Syntax {
        message: error.kind().msg().to_string(),
        offset: error.span().lo.0.saturating_sub(start.0) as usize,
    }
}

/// Strip every piece of type syntax and print the remaining JavaScript
pub(super) fn lower(file_name: &str, source: &str) -> Result<String, TranspileError> {
    GLOBALS.set(&Globals::new(), || {
        let parsed = SourceModule::parse(file_name, source)?;
        let unresolved_mark = Mark::new();
        let top_level_mark = Mark::new();

        let mut program = Program::Module(parsed.module.clone());
        (
            resolver(unresolved_mark, top_level_mark, true),
            strip(unresolved_mark, top_level_mark),
        )
            .process(&mut program);

        Ok(parsed.print(&program))
    })
}

/// Build the `.d.ts` text for a module whose exports carry explicit types.
/// The declared runtime names must match what the module itself exports.
pub(super) fn declarations(file_name: &str, source: &str) -> Result<String, TranspileError> {
    GLOBALS.set(&Globals::new(), || {
        let parsed = SourceModule::parse(file_name, source)?;
        let unresolved_mark = Mark::new();
        let top_level_mark = Mark::new();

        let mut program = Program::Module(parsed.module.clone());
        resolver(unresolved_mark, top_level_mark, true).process(&mut program);

        let mut checker = FastDts::new(
            parsed.file_name.clone(),
            unresolved_mark,
            FastDtsOptions {
                internal_annotations: None,
            },
        );
        let issues = checker.transform(&mut program);
        if !issues.is_empty() {
            return Err(TranspileError::Declarations(
                issues.iter().map(|issue| format!("{issue:?}")).collect(),
            ));
        }

        let runtime = value_exports(&parsed.module);
        let declared = match &program {
            Program::Module(module) => value_exports(module),
            Program::Script(_) => BTreeSet::new(),
        };
        if declared != runtime {
            return Err(TranspileError::ExportMismatch {
                declared: declared.into_iter().collect(),
                runtime: runtime.into_iter().collect(),
            });
        }

        Ok(parsed.print(&program))
    })
}

/// Runtime names exported by `source`, `default` included
pub(super) fn exported_values(source: &str) -> Result<BTreeSet<String>, TranspileError> {
    GLOBALS.set(&Globals::new(), || {
        let parsed = SourceModule::parse("exports.ts", source)?;
        Ok(value_exports(&parsed.module))
    })
}

fn value_exports(module: &Module) -> BTreeSet<String> {
    let mut names = BTreeSet::new();

    for item in &module.body {
        let ModuleItem::ModuleDecl(decl) = item else {
            continue;
        };

        match decl {
            ModuleDecl::ExportDecl(export) => match &export.decl {
                Decl::Class(class) => {
                    names.insert(class.ident.sym.to_string());
                }
                Decl::Fn(function) => {
                    names.insert(function.ident.sym.to_string());
                }
                Decl::Var(var) => {
                    names.extend(var.decls.iter().filter_map(|d| binding_name(&d.name)));
                }
                Decl::TsEnum(enumeration) => {
                    names.insert(enumeration.id.sym.to_string());
                }
                _ => {}
            },
            ModuleDecl::ExportDefaultDecl(export) => {
                if !matches!(export.decl, DefaultDecl::TsInterfaceDecl(_)) {
                    names.insert("default".to_string());
                }
            }
            ModuleDecl::ExportDefaultExpr(_) => {
                names.insert("default".to_string());
            }
            ModuleDecl::ExportNamed(named) if !named.type_only => {
                for specifier in &named.specifiers {
                    match specifier {
                        ExportSpecifier::Named(spec) if !spec.is_type_only => {
                            let exported = spec.exported.as_ref().unwrap_or(&spec.orig);
                            names.extend(export_name(exported));
                        }
                        ExportSpecifier::Default(spec) => {
                            names.insert(spec.exported.sym.to_string());
                        }
                        ExportSpecifier::Namespace(spec) => {
                            names.extend(export_name(&spec.name));
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    names
}

fn binding_name(pattern: &Pat) -> Option<String> {
    match pattern {
        Pat::Ident(binding) => Some(binding.id.sym.to_string()),
        _ => None,
    }
}

fn export_name(name: &ModuleExportName) -> Option<String> {
    match name {
        ModuleExportName::Ident(ident) => Some(ident.sym.to_string()),
        _ => None,
    }
}
